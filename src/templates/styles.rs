//! CSS styles for the workbench front end.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --yellow: #b58900;
    --red: #dc322f;
    --blue: #268bd2;
    --cyan: #2aa198;
    --green: #859900;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --accent: var(--base2);
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 900px;
    margin: 0 auto;
    padding: 1rem;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

h1, h2, h3 { font-weight: 600; margin-top: 1.5em; margin-bottom: 0.5em; }
h1 { font-size: 1.5rem; }
h2 { font-size: 1.2rem; }

.nav-bar {
    position: sticky;
    top: 0;
    background: var(--bg);
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    display: flex;
    gap: 1rem;
    align-items: center;
    flex-wrap: wrap;
    z-index: 100;
}

.nav-bar .spacer { flex: 1; }

.nav-bar button {
    background: none;
    border: none;
    color: var(--link);
    cursor: pointer;
    font-family: inherit;
    font-size: 0.9rem;
}
.nav-bar button:hover { color: var(--link-hover); text-decoration: underline; }
.nav-bar button.active { color: var(--base01); font-weight: 600; }

.page { display: none; }
.page.active { display: block; }

.item-list { list-style: none; }

.item {
    padding: 0.6rem 0;
    border-bottom: 1px solid var(--border);
    display: flex;
    justify-content: space-between;
    align-items: baseline;
    gap: 1rem;
}
.item:last-child { border-bottom: none; }
.item .title { flex: 1; cursor: pointer; }
.item .meta { font-size: 0.8rem; color: var(--muted); white-space: nowrap; }
.item.done .title { text-decoration: line-through; color: var(--muted); }

.form-row {
    display: flex;
    gap: 0.5rem;
    margin: 0.75rem 0;
    flex-wrap: wrap;
}

input[type=text], input[type=number], input[type=date], textarea, select {
    padding: 0.4rem 0.75rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg);
    color: var(--fg);
    font-family: inherit;
    font-size: 0.9rem;
}
input[type=text] { flex: 1; min-width: 160px; }
textarea { width: 100%; min-height: 160px; resize: vertical; }
input[type=number] { width: 4.5rem; }
label { font-size: 0.85rem; color: var(--muted); }

.btn {
    padding: 0.4rem 0.9rem;
    border: 1px solid var(--link);
    border-radius: 4px;
    background: var(--link);
    color: white;
    cursor: pointer;
    font-size: 0.85rem;
    font-family: inherit;
}
.btn:hover { background: var(--cyan); border-color: var(--cyan); }
.btn.secondary { background: var(--base2); color: var(--base00); border-color: var(--base1); }
.btn.danger { background: var(--red); border-color: var(--red); }

.progress {
    height: 6px;
    background: var(--accent);
    border-radius: 3px;
    overflow: hidden;
    width: 120px;
}
.progress > div { height: 100%; background: var(--green); }

.priority { font-size: 0.7rem; text-transform: uppercase; letter-spacing: 0.05em; color: var(--yellow); }

.chat-log {
    border: 1px solid var(--border);
    border-radius: 4px;
    padding: 0.75rem;
    height: 360px;
    overflow-y: auto;
    background: white;
}
.chat-msg { margin: 0.4rem 0; white-space: pre-wrap; }
.chat-msg.user { text-align: right; }
.chat-msg span {
    display: inline-block;
    padding: 0.3rem 0.7rem;
    border-radius: 10px;
    background: var(--accent);
    max-width: 80%;
    text-align: left;
}
.chat-msg.user span { background: var(--link); color: white; }

.timer { text-align: center; color: var(--muted); }
.timer.clock { font-size: 4rem; font-variant-numeric: tabular-nums; color: var(--fg); }
.timer.clock.running { color: var(--red); }

.empty { color: var(--muted); font-style: italic; }
"#;
