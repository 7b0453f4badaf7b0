//! Client-side script for the single-page front end.
//!
//! Talks to the `/api/*` JSON endpoints; all rendering happens in the browser.

pub const APP_JS: &str = r##"
const $ = (id) => document.getElementById(id);
let currentNoteId = null;
let currentProjectId = null;
let currentTaskId = null;
let notes = [];
let projects = [];
let tasks = [];

function escapeHtml(s) {
    const div = document.createElement('div');
    div.textContent = s == null ? '' : String(s);
    return div.innerHTML;
}

async function api(method, url, body) {
    const opts = { method, headers: {} };
    if (body !== undefined) {
        opts.headers['Content-Type'] = 'application/json';
        opts.body = JSON.stringify(body);
    }
    const response = await fetch(url, opts);
    const data = await response.json().catch(() => ({}));
    if (!response.ok) {
        alert(data.error || ('Request failed: ' + response.status));
        throw new Error(data.error);
    }
    return data;
}

function shortDate(ts) {
    return ts ? ts.replace('T', ' ').slice(0, 16) : '';
}

// ---------------------------------------------------------------- tabs

function showTab(tab) {
    document.querySelectorAll('.page').forEach(p => p.classList.remove('active'));
    document.querySelectorAll('.nav-bar button').forEach(b => b.classList.remove('active'));
    $(tab + 'Page').classList.add('active');
    $(tab + 'TabBtn').classList.add('active');
    if (tab === 'notes') loadNotes();
    if (tab === 'todos') loadTodos();
    if (tab === 'projects') loadProjects();
    if (tab === 'chat') loadChat();
}

// ---------------------------------------------------------------- notes

async function loadNotes() {
    notes = await api('GET', '/api/notes');
    renderNotes();
}

function renderNotes() {
    const term = $('noteSearch').value.trim().toLowerCase();
    const shown = term ? notes.filter(n => n.title.toLowerCase().includes(term)) : notes;
    const list = $('notesList');
    if (!shown.length) {
        list.innerHTML = term
            ? `<li class="empty">No notes match "${escapeHtml(term)}"</li>`
            : '<li class="empty">No notes yet</li>';
        return;
    }
    list.innerHTML = shown.map(n =>
        `<li class="item"><span class="title" data-id="${n.id}">${escapeHtml(n.title)}</span>` +
        `<span class="meta">${shortDate(n.updated_at)}</span></li>`).join('');
    list.querySelectorAll('.title').forEach(el =>
        el.addEventListener('click', () => openNote(el.dataset.id)));
}

function editNote(id, title, content) {
    currentNoteId = id;
    $('noteTitle').value = title;
    $('noteContent').value = content;
    $('deleteNoteBtn').style.display = id ? '' : 'none';
    $('noteEditor').style.display = '';
}

async function openNote(id) {
    const note = await api('GET', '/api/notes/' + id);
    editNote(note.id, note.title, note.content);
}

async function saveNote() {
    const body = { title: $('noteTitle').value, content: $('noteContent').value };
    if (currentNoteId) {
        await api('PUT', '/api/notes/' + currentNoteId, body);
    } else {
        await api('POST', '/api/notes', body);
    }
    $('noteEditor').style.display = 'none';
    loadNotes();
}

async function deleteNote() {
    if (!currentNoteId || !confirm('Delete this note?')) return;
    await api('DELETE', '/api/notes/' + currentNoteId);
    $('noteEditor').style.display = 'none';
    loadNotes();
}

// ---------------------------------------------------------------- todos

async function loadTodos() {
    const todos = await api('GET', '/api/todos');
    const list = $('todosList');
    list.innerHTML = todos.map(t =>
        `<li class="item ${t.completed ? 'done' : ''}">` +
        `<input type="checkbox" data-id="${t.id}" ${t.completed ? 'checked' : ''}>` +
        `<span class="title">${escapeHtml(t.title)}</span>` +
        `<button class="btn secondary" data-del="${t.id}">&times;</button></li>`).join('')
        || '<li class="empty">Nothing to do</li>';
    list.querySelectorAll('input[type=checkbox]').forEach(cb =>
        cb.addEventListener('change', async () => {
            await api('PUT', '/api/todos/' + cb.dataset.id, { completed: cb.checked });
            loadTodos();
        }));
    list.querySelectorAll('[data-del]').forEach(btn =>
        btn.addEventListener('click', async () => {
            await api('DELETE', '/api/todos/' + btn.dataset.del);
            loadTodos();
        }));
}

async function addTodo() {
    const title = $('newTodoInput').value.trim();
    if (!title) return;
    await api('POST', '/api/todos', { title });
    $('newTodoInput').value = '';
    loadTodos();
}

// ---------------------------------------------------------------- projects

async function loadProjects() {
    projects = await api('GET', '/api/projects');
    renderProjects();
}

function renderProjects() {
    const term = $('projectSearch').value.trim().toLowerCase();
    const status = $('projectStatusFilter').value;
    const shown = projects.filter(p =>
        (status === 'all' || p.status === status) &&
        (!term || p.name.toLowerCase().includes(term) ||
            (p.description || '').toLowerCase().includes(term)));
    const list = $('projectsList');
    list.innerHTML = shown.map(p =>
        `<li class="item"><span class="title" data-id="${p.id}">${escapeHtml(p.name)}</span>` +
        `<span class="meta">${escapeHtml(p.status)}</span>` +
        `<div class="progress"><div style="width:${p.progress}%"></div></div>` +
        `<button class="btn secondary" data-del="${p.id}">&times;</button></li>`).join('')
        || '<li class="empty">No projects</li>';
    list.querySelectorAll('.title').forEach(el =>
        el.addEventListener('click', () => openProject(el.dataset.id)));
    list.querySelectorAll('[data-del]').forEach(btn =>
        btn.addEventListener('click', async () => {
            if (!confirm('Delete this project and its tasks?')) return;
            await api('DELETE', '/api/projects/' + btn.dataset.del);
            if (currentProjectId === btn.dataset.del) {
                currentProjectId = null;
                $('projectDetail').style.display = 'none';
            }
            loadProjects();
        }));
}

// Editing reuses the create form; `editingProject` tells them apart.
let editingProject = false;

function showProjectForm(project) {
    editingProject = !!project;
    $('projectName').value = project ? project.name : '';
    $('projectDescription').value = project ? (project.description || '') : '';
    $('projectStatus').value = project ? project.status : 'active';
    $('projectForm').style.display = '';
}

async function saveProject() {
    const body = {
        name: $('projectName').value.trim(),
        description: $('projectDescription').value.trim(),
        status: $('projectStatus').value,
    };
    if (!body.name) {
        alert('Project name is required');
        return;
    }
    if (editingProject && currentProjectId) {
        await api('PUT', '/api/projects/' + currentProjectId, body);
        openProject(currentProjectId);
    } else {
        await api('POST', '/api/projects', body);
    }
    $('projectForm').style.display = 'none';
    loadProjects();
}

async function openProject(id) {
    currentProjectId = id;
    const project = await api('GET', '/api/projects/' + id);
    $('projectTitle').textContent = project.name + ' (' + project.progress + '%)';
    $('projectInfo').textContent = project.status + (project.description ? ' · ' + project.description : '');
    $('projectDetail').style.display = '';
    loadTasks();
}

async function refreshProject() {
    await openProject(currentProjectId);
    loadProjects();
}

async function loadTasks() {
    tasks = await api('GET', '/api/projects/' + currentProjectId + '/tasks');
    renderTasks();
}

function renderTasks() {
    const status = $('taskStatusFilter').value;
    const shown = status === 'all' ? tasks : tasks.filter(t => t.status === status);
    const list = $('tasksList');
    list.innerHTML = shown.map(t =>
        `<li class="item ${t.status === 'completed' ? 'done' : ''}">` +
        `<input type="checkbox" data-id="${t.id}" ${t.status === 'completed' ? 'checked' : ''}>` +
        `<span class="title" data-edit="${t.id}">${escapeHtml(t.title)}</span>` +
        `<span class="priority">${escapeHtml(t.priority)}</span>` +
        `<span class="meta">${t.due_date ? 'due ' + escapeHtml(t.due_date) : ''}</span>` +
        `<button class="btn secondary" data-del="${t.id}">&times;</button></li>`).join('')
        || '<li class="empty">No tasks</li>';
    const base = '/api/projects/' + currentProjectId + '/tasks/';
    list.querySelectorAll('input[type=checkbox]').forEach(cb =>
        cb.addEventListener('change', async () => {
            await api('PUT', base + cb.dataset.id, { status: cb.checked ? 'completed' : 'pending' });
            refreshProject();
        }));
    list.querySelectorAll('[data-edit]').forEach(el =>
        el.addEventListener('click', () =>
            showTaskForm(tasks.find(t => t.id === el.dataset.edit))));
    list.querySelectorAll('[data-del]').forEach(btn =>
        btn.addEventListener('click', async () => {
            await api('DELETE', base + btn.dataset.del);
            refreshProject();
        }));
}

function showTaskForm(task) {
    currentTaskId = task ? task.id : null;
    $('taskTitle').value = task ? task.title : '';
    $('taskDescription').value = task ? (task.description || '') : '';
    $('taskStatus').value = task ? task.status : 'pending';
    $('taskPriority').value = task ? task.priority : 'medium';
    $('taskDueDate').value = task && task.due_date ? task.due_date : '';
    $('taskForm').style.display = '';
}

async function saveTask() {
    if (!currentProjectId) return;
    const body = {
        title: $('taskTitle').value.trim(),
        description: $('taskDescription').value.trim(),
        status: $('taskStatus').value,
        priority: $('taskPriority').value,
        due_date: $('taskDueDate').value || null,
    };
    if (!body.title) {
        alert('Task title is required');
        return;
    }
    const base = '/api/projects/' + currentProjectId + '/tasks';
    if (currentTaskId) {
        await api('PUT', base + '/' + currentTaskId, body);
    } else {
        await api('POST', base, body);
    }
    $('taskForm').style.display = 'none';
    currentTaskId = null;
    refreshProject();
}

// ---------------------------------------------------------------- pomodoro

// Runs entirely in the browser; settings and today's stats live in localStorage.
const POMODORO_LIMITS = { work: 60, short: 30, long: 60 };
const PHASE_LABELS = { work: 'Focus', short: 'Short break', long: 'Long break' };
let pomodoroSettings = { work: 25, short: 5, long: 15 };
let pomodoroStats = { day: new Date().toDateString(), completed: 0, focusMinutes: 0, sessions: [] };
let pomodoroPhase = 'work';
let pomodoroRound = 0;
let pomodoroLeft = 25 * 60;
let pomodoroTimer = null;

function loadPomodoro() {
    const settings = JSON.parse(localStorage.getItem('pomodoroSettings') || 'null');
    if (settings) pomodoroSettings = settings;
    const stats = JSON.parse(localStorage.getItem('pomodoroStats') || 'null');
    if (stats && stats.day === new Date().toDateString()) pomodoroStats = stats;
    $('workMinutes').value = pomodoroSettings.work;
    $('shortBreakMinutes').value = pomodoroSettings.short;
    $('longBreakMinutes').value = pomodoroSettings.long;
    resetPomodoro();
}

function changePomodoroSetting(kind, input) {
    const minutes = Math.max(1, Math.min(POMODORO_LIMITS[kind], parseInt(input.value, 10) || 1));
    input.value = minutes;
    pomodoroSettings[kind] = minutes;
    localStorage.setItem('pomodoroSettings', JSON.stringify(pomodoroSettings));
    if (!pomodoroTimer) resetPomodoro();
}

function renderPomodoro() {
    const m = String(Math.floor(pomodoroLeft / 60)).padStart(2, '0');
    const s = String(pomodoroLeft % 60).padStart(2, '0');
    $('pomodoroClock').textContent = m + ':' + s;
    $('pomodoroClock').classList.toggle('running', !!pomodoroTimer);
    $('pomodoroPhase').textContent = PHASE_LABELS[pomodoroPhase];
    $('pomodoroStartBtn').textContent = pomodoroTimer ? 'Pause' : 'Start';
    $('pomodoroStats').textContent =
        `Today: ${pomodoroStats.completed} pomodoros, ${pomodoroStats.focusMinutes} minutes focused`;
    $('pomodoroSessions').innerHTML = pomodoroStats.sessions.map(s =>
        `<li class="item"><span class="title">${PHASE_LABELS[s.phase]}</span>` +
        `<span class="meta">${s.minutes} min at ${s.at}</span></li>`).join('');
}

function togglePomodoro() {
    if (pomodoroTimer) {
        clearInterval(pomodoroTimer);
        pomodoroTimer = null;
    } else {
        pomodoroTimer = setInterval(() => {
            pomodoroLeft--;
            if (pomodoroLeft <= 0) finishPhase(true);
            renderPomodoro();
        }, 1000);
    }
    renderPomodoro();
}

function resetPomodoro() {
    clearInterval(pomodoroTimer);
    pomodoroTimer = null;
    pomodoroLeft = pomodoroSettings[pomodoroPhase] * 60;
    renderPomodoro();
}

// Every fourth focus round is followed by a long break.
function finishPhase(record) {
    clearInterval(pomodoroTimer);
    pomodoroTimer = null;
    if (record) {
        const at = new Date().toLocaleTimeString([], { hour: '2-digit', minute: '2-digit' });
        pomodoroStats.sessions.unshift({ phase: pomodoroPhase, minutes: pomodoroSettings[pomodoroPhase], at });
        pomodoroStats.sessions = pomodoroStats.sessions.slice(0, 20);
    }
    if (pomodoroPhase === 'work') {
        pomodoroRound++;
        if (record) {
            pomodoroStats.completed++;
            pomodoroStats.focusMinutes += pomodoroSettings.work;
        }
        pomodoroPhase = pomodoroRound % 4 === 0 ? 'long' : 'short';
    } else {
        pomodoroPhase = 'work';
    }
    pomodoroStats.day = new Date().toDateString();
    localStorage.setItem('pomodoroStats', JSON.stringify(pomodoroStats));
    pomodoroLeft = pomodoroSettings[pomodoroPhase] * 60;
    renderPomodoro();
}

// ---------------------------------------------------------------- chat

let chatHistory = [];

function renderChat() {
    $('chatMessages').innerHTML = chatHistory.map(m =>
        `<div class="chat-msg ${m.role}"><span>${escapeHtml(m.content)}</span></div>`).join('');
    $('chatMessages').scrollTop = $('chatMessages').scrollHeight;
}

async function loadChat() {
    chatHistory = await api('GET', '/api/chat/history');
    renderChat();
}

async function sendChat() {
    const message = $('chatInput').value.trim();
    if (!message) return;
    $('chatInput').value = '';
    const history = chatHistory.slice(-5).map(m => ({ role: m.role, content: m.content }));
    chatHistory.push({ role: 'user', content: message });
    renderChat();
    const data = await api('POST', '/api/chat', { message, history });
    chatHistory.push({ role: 'assistant', content: data.reply });
    renderChat();
}

async function clearChat() {
    await api('DELETE', '/api/chat/clear');
    chatHistory = [];
    renderChat();
}

// ---------------------------------------------------------------- wiring

document.addEventListener('DOMContentLoaded', () => {
    document.querySelectorAll('.nav-bar button[data-tab]').forEach(b =>
        b.addEventListener('click', () => showTab(b.dataset.tab)));
    $('newNoteBtn').addEventListener('click', () => editNote(null, '', ''));
    $('saveNoteBtn').addEventListener('click', saveNote);
    $('cancelNoteBtn').addEventListener('click', () => $('noteEditor').style.display = 'none');
    $('deleteNoteBtn').addEventListener('click', deleteNote);
    $('addTodoBtn').addEventListener('click', addTodo);
    $('newTodoInput').addEventListener('keydown', e => { if (e.key === 'Enter') addTodo(); });
    $('noteSearch').addEventListener('input', renderNotes);
    $('projectSearch').addEventListener('input', renderProjects);
    $('projectStatusFilter').addEventListener('change', renderProjects);
    $('newProjectBtn').addEventListener('click', () => showProjectForm(null));
    $('editProjectBtn').addEventListener('click', () =>
        showProjectForm(projects.find(p => p.id === currentProjectId)));
    $('saveProjectBtn').addEventListener('click', saveProject);
    $('cancelProjectBtn').addEventListener('click', () => $('projectForm').style.display = 'none');
    $('taskStatusFilter').addEventListener('change', renderTasks);
    $('newTaskBtn').addEventListener('click', () => showTaskForm(null));
    $('saveTaskBtn').addEventListener('click', saveTask);
    $('cancelTaskBtn').addEventListener('click', () => $('taskForm').style.display = 'none');
    $('pomodoroStartBtn').addEventListener('click', togglePomodoro);
    $('pomodoroResetBtn').addEventListener('click', resetPomodoro);
    $('pomodoroSkipBtn').addEventListener('click', () => finishPhase(false));
    $('workMinutes').addEventListener('change', e => changePomodoroSetting('work', e.target));
    $('shortBreakMinutes').addEventListener('change', e => changePomodoroSetting('short', e.target));
    $('longBreakMinutes').addEventListener('change', e => changePomodoroSetting('long', e.target));
    $('sendChatBtn').addEventListener('click', sendChat);
    $('chatInput').addEventListener('keydown', e => { if (e.key === 'Enter') sendChat(); });
    $('clearChatBtn').addEventListener('click', clearChat);
    loadPomodoro();
    loadNotes();
});
"##;
