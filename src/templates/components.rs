//! Shared HTML components for the workbench.
//!
//! Contains the navigation bar, the base HTML template, the single-page front
//! end and the debug page.

use super::app_js::APP_JS;
use super::styles::STYLE;

/// Tabs of the single-page front end: (element id suffix, label).
const TABS: [(&str, &str); 5] = [
    ("notes", "Notes"),
    ("todos", "Todos"),
    ("projects", "Projects"),
    ("pomodoro", "Pomodoro"),
    ("chat", "Assistant"),
];

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Navigation Bar
// ============================================================================

pub fn nav_bar(active: &str) -> String {
    let mut buttons = String::new();
    for (id, label) in TABS {
        let class = if id == active { " class=\"active\"" } else { "" };
        buttons.push_str(&format!(
            r#"<button id="{id}TabBtn" data-tab="{id}"{class}>{label}</button>"#,
        ));
    }

    format!(
        r#"<nav class="nav-bar">
            <strong>Workbench</strong>
            {buttons}
            <span class="spacer"></span>
            <a href="/debug">debug</a>
        </nav>"#
    )
}

// ============================================================================
// Base Template
// ============================================================================

pub fn base_html(title: &str, content: &str, nav: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {nav}
    <div class="container">
        {content}
    </div>
    <script>{script}</script>
</body>
</html>"#,
        title = html_escape(title),
    )
}

// ============================================================================
// Pages
// ============================================================================

pub fn index_html() -> String {
    let content = r#"
        <section class="page active" id="notesPage">
            <h1>Notes</h1>
            <div class="form-row">
                <input type="text" id="noteSearch" placeholder="Search notes">
                <button class="btn" id="newNoteBtn">New note</button>
            </div>
            <div id="noteEditor" style="display:none">
                <div class="form-row"><input type="text" id="noteTitle" placeholder="Title"></div>
                <textarea id="noteContent" placeholder="Write something..."></textarea>
                <div class="form-row">
                    <button class="btn" id="saveNoteBtn">Save</button>
                    <button class="btn secondary" id="cancelNoteBtn">Cancel</button>
                    <button class="btn danger" id="deleteNoteBtn" style="display:none">Delete</button>
                </div>
            </div>
            <ul class="item-list" id="notesList"></ul>
        </section>

        <section class="page" id="todosPage">
            <h1>Todos</h1>
            <div class="form-row">
                <input type="text" id="newTodoInput" placeholder="What needs doing?">
                <button class="btn" id="addTodoBtn">Add</button>
            </div>
            <ul class="item-list" id="todosList"></ul>
        </section>

        <section class="page" id="projectsPage">
            <h1>Projects</h1>
            <div class="form-row">
                <input type="text" id="projectSearch" placeholder="Search projects">
                <select id="projectStatusFilter">
                    <option value="all">all</option>
                    <option value="active">active</option>
                    <option value="in_progress">in progress</option>
                    <option value="on_hold">on hold</option>
                    <option value="completed">completed</option>
                </select>
                <button class="btn" id="newProjectBtn">New project</button>
            </div>
            <div id="projectForm" style="display:none">
                <div class="form-row">
                    <input type="text" id="projectName" placeholder="Project name">
                    <select id="projectStatus">
                        <option value="active">active</option>
                        <option value="in_progress">in progress</option>
                        <option value="on_hold">on hold</option>
                        <option value="completed">completed</option>
                    </select>
                </div>
                <textarea id="projectDescription" placeholder="Description"></textarea>
                <div class="form-row">
                    <button class="btn" id="saveProjectBtn">Save</button>
                    <button class="btn secondary" id="cancelProjectBtn">Cancel</button>
                </div>
            </div>
            <ul class="item-list" id="projectsList"></ul>
            <div id="projectDetail" style="display:none">
                <h2 id="projectTitle"></h2>
                <p class="meta" id="projectInfo"></p>
                <div class="form-row">
                    <button class="btn secondary" id="editProjectBtn">Edit project</button>
                    <select id="taskStatusFilter">
                        <option value="all">all tasks</option>
                        <option value="pending">pending</option>
                        <option value="in_progress">in progress</option>
                        <option value="completed">completed</option>
                    </select>
                    <button class="btn" id="newTaskBtn">New task</button>
                </div>
                <div id="taskForm" style="display:none">
                    <div class="form-row">
                        <input type="text" id="taskTitle" placeholder="Task title">
                        <select id="taskStatus">
                            <option value="pending">pending</option>
                            <option value="in_progress">in progress</option>
                            <option value="completed">completed</option>
                        </select>
                        <select id="taskPriority">
                            <option value="low">low</option>
                            <option value="medium" selected>medium</option>
                            <option value="high">high</option>
                        </select>
                        <input type="date" id="taskDueDate">
                    </div>
                    <textarea id="taskDescription" placeholder="Description"></textarea>
                    <div class="form-row">
                        <button class="btn" id="saveTaskBtn">Save task</button>
                        <button class="btn secondary" id="cancelTaskBtn">Cancel</button>
                    </div>
                </div>
                <ul class="item-list" id="tasksList"></ul>
            </div>
        </section>

        <section class="page" id="pomodoroPage">
            <h1>Pomodoro</h1>
            <div class="timer" id="pomodoroPhase">Focus</div>
            <div class="timer clock" id="pomodoroClock">25:00</div>
            <div class="form-row">
                <button class="btn" id="pomodoroStartBtn">Start</button>
                <button class="btn secondary" id="pomodoroResetBtn">Reset</button>
                <button class="btn secondary" id="pomodoroSkipBtn">Skip</button>
            </div>
            <div class="form-row">
                <label>Focus <input type="number" id="workMinutes" min="1" max="60"></label>
                <label>Short break <input type="number" id="shortBreakMinutes" min="1" max="30"></label>
                <label>Long break <input type="number" id="longBreakMinutes" min="1" max="60"></label>
            </div>
            <p class="meta" id="pomodoroStats"></p>
            <ul class="item-list" id="pomodoroSessions"></ul>
        </section>

        <section class="page" id="chatPage">
            <h1>Assistant</h1>
            <div class="chat-log" id="chatMessages"></div>
            <div class="form-row">
                <input type="text" id="chatInput" placeholder="Say something...">
                <button class="btn" id="sendChatBtn">Send</button>
                <button class="btn secondary" id="clearChatBtn">Clear</button>
            </div>
        </section>
    "#;

    base_html("Workbench", content, &nav_bar("notes"), APP_JS)
}

/// Checks that the front end page loads and carries the expected controls.
pub fn debug_html() -> String {
    let content = r#"
        <h1>Debug Page</h1>
        <button class="btn" onclick="console.log('Button clicked')">Test Button</button>
        <ul class="item-list" id="checks"></ul>
    "#;

    let script = r#"
    console.log('Debug page loaded');
    fetch('/').then(r => r.text()).then(html => {
        const doc = new DOMParser().parseFromString(html, 'text/html');
        const list = document.getElementById('checks');
        for (const id of ['newNoteBtn', 'notesTabBtn', 'todosTabBtn', 'projectsTabBtn', 'pomodoroTabBtn', 'chatTabBtn']) {
            const ok = !!doc.getElementById(id);
            console.log(id + ' exists:', ok);
            const li = document.createElement('li');
            li.className = 'item';
            li.textContent = id + ': ' + (ok ? 'ok' : 'MISSING');
            list.appendChild(li);
        }
    });
    "#;

    let nav = r#"<nav class="nav-bar"><a href="/">&larr; Workbench</a></nav>"#;
    base_html("Debug", content, nav, script)
}
