use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crate::config::Config;
use crate::extract::{locator, AudioFormat, ExtractionRequest, Extractor, JobEvent, JobHandle};
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    SelectingFile,
    Settings,
    Extracting,
    Done,
}

/// Bitrate choices offered in the settings screen. 192k is the default.
pub const BITRATES: [(&str, &str); 4] = [
    ("128k", "standard"),
    ("192k", "high"),
    ("256k", "very high"),
    ("320k", "extreme"),
];

pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub format_index: usize,
    pub bitrate_index: usize,
    pub progress: u8,
    pub progress_message: String,
    pub log: Vec<String>,
    pub error_message: Option<String>,
    pub ffmpeg_available: bool,
    pub file_browser: FileBrowser,
    config: Config,
    events_rx: Option<Receiver<JobEvent>>,
    job: Option<JobHandle>,
}

pub struct FileBrowser {
    pub current_dir: PathBuf,
    pub entries: Vec<PathBuf>,
    pub selected: usize,
    pub show_hidden: bool,
}

impl FileBrowser {
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let mut browser = Self {
            current_dir,
            entries: Vec::new(),
            selected: 0,
            show_hidden: false,
        };
        browser.refresh();
        browser
    }

    pub fn refresh(&mut self) {
        self.entries.clear();

        // Add parent directory option
        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(parent.to_path_buf());
        }

        if let Ok(entries) = std::fs::read_dir(&self.current_dir) {
            let mut dirs: Vec<PathBuf> = Vec::new();
            let mut files: Vec<PathBuf> = Vec::new();

            for entry in entries.flatten() {
                let path = entry.path();
                let name = path.file_name().unwrap_or_default().to_string_lossy();

                if !self.show_hidden && name.starts_with('.') {
                    continue;
                }

                if path.is_dir() {
                    dirs.push(path);
                } else if is_video_file(&path) {
                    files.push(path);
                }
            }

            dirs.sort();
            files.sort();

            self.entries.extend(dirs);
            self.entries.extend(files);
        }

        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }

    pub fn enter(&mut self) -> Option<PathBuf> {
        if let Some(path) = self.entries.get(self.selected) {
            if path.is_dir() {
                self.current_dir = path.clone();
                self.selected = 0;
                self.refresh();
                None
            } else {
                Some(path.clone())
            }
        } else {
            None
        }
    }

    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn down(&mut self) {
        if self.selected < self.entries.len().saturating_sub(1) {
            self.selected += 1;
        }
    }
}

fn is_video_file(path: &PathBuf) -> bool {
    let extensions = [
        "mp4", "mkv", "avi", "mov", "webm", "flv", "wmv", "m4v", "mpg", "mpeg",
    ];
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

impl App {
    pub fn new(config: Config) -> Self {
        let ffmpeg_available = config.encoder.path.is_some() || locator::locate().is_some();
        let format_index = AudioFormat::ALL
            .iter()
            .position(|f| *f == config.extraction.format)
            .unwrap_or(0);
        let bitrate_index = BITRATES
            .iter()
            .position(|(rate, _)| *rate == config.extraction.bitrate)
            .unwrap_or(1);

        Self {
            state: AppState::Home,
            should_quit: false,
            input_path: None,
            output_path: None,
            format_index,
            bitrate_index,
            progress: 0,
            progress_message: String::new(),
            log: Vec::new(),
            error_message: None,
            ffmpeg_available,
            file_browser: FileBrowser::new(),
            config,
            events_rx: None,
            job: None,
        }
    }

    pub fn selected_format(&self) -> AudioFormat {
        AudioFormat::ALL[self.format_index]
    }

    pub fn selected_bitrate(&self) -> &'static str {
        BITRATES[self.bitrate_index].0
    }

    /// Output path derived from the input and the selected format,
    /// recomputed whenever the format changes.
    pub fn derived_output(&self) -> Option<PathBuf> {
        self.input_path
            .as_ref()
            .map(|p| p.with_extension(self.selected_format().extension()))
    }

    pub fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        loop {
            // Drain job events
            self.check_progress();

            // Draw UI
            terminal.draw(|frame| self.draw(frame))?;

            // Handle events with timeout so job updates keep flowing
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        if let Some(job) = &mut self.job {
            job.cancel();
        }
        Ok(())
    }

    fn check_progress(&mut self) {
        // Take the receiver out to avoid borrow issues
        let rx = match self.events_rx.take() {
            Some(rx) => rx,
            None => return,
        };

        let mut messages = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            messages.push(msg);
        }

        let mut finished = false;
        for msg in messages {
            match msg {
                JobEvent::Log(line) => self.log.push(line),
                JobEvent::Progress(percent, message) => {
                    self.progress = percent;
                    self.progress_message = message;
                }
                JobEvent::Finished(Ok(path)) => {
                    self.progress = 100;
                    self.log.push(format!("Saved to: {}", path.display()));
                    self.output_path = Some(path);
                    self.state = AppState::Done;
                    finished = true;
                }
                JobEvent::Finished(Err(e)) => {
                    self.error_message = Some(e.to_string());
                    self.state = AppState::Done;
                    finished = true;
                }
            }
        }

        if finished {
            self.job = None;
        } else {
            self.events_rx = Some(rx);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match self.state {
            AppState::Home => self.handle_home_keys(key),
            AppState::SelectingFile => self.handle_file_browser_keys(key),
            AppState::Settings => self.handle_settings_keys(key),
            AppState::Extracting => self.handle_extracting_keys(key),
            AppState::Done => self.handle_done_keys(key),
        }
    }

    fn handle_home_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char('s') => {
                self.state = AppState::SelectingFile;
            }
            _ => {}
        }
    }

    fn handle_file_browser_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state = AppState::Home;
            }
            KeyCode::Up | KeyCode::Char('k') => self.file_browser.up(),
            KeyCode::Down | KeyCode::Char('j') => self.file_browser.down(),
            KeyCode::Enter => {
                if let Some(path) = self.file_browser.enter() {
                    self.input_path = Some(path);
                    self.state = AppState::Settings;
                }
            }
            KeyCode::Char('.') => {
                self.file_browser.show_hidden = !self.file_browser.show_hidden;
                self.file_browser.refresh();
            }
            _ => {}
        }
    }

    fn handle_settings_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.state = AppState::SelectingFile,
            KeyCode::Left | KeyCode::Char('h') => {
                self.format_index =
                    (self.format_index + AudioFormat::ALL.len() - 1) % AudioFormat::ALL.len();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.format_index = (self.format_index + 1) % AudioFormat::ALL.len();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.selected_format().is_lossless() {
                    self.bitrate_index =
                        (self.bitrate_index + BITRATES.len() - 1) % BITRATES.len();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.selected_format().is_lossless() {
                    self.bitrate_index = (self.bitrate_index + 1) % BITRATES.len();
                }
            }
            KeyCode::Enter => self.start_extraction(),
            _ => {}
        }
    }

    fn handle_extracting_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.cancel_extraction(),
            _ => {}
        }
    }

    fn handle_done_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Enter | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.reset(),
            _ => {}
        }
    }

    fn start_extraction(&mut self) {
        let input = match &self.input_path {
            Some(path) => path.clone(),
            None => return,
        };

        if !self.ffmpeg_available {
            self.error_message =
                Some(format!("FFmpeg not found. {}", locator::install_hint()));
            return;
        }

        let request = ExtractionRequest {
            input,
            output: None,
            format: self.selected_format(),
            bitrate: self.selected_bitrate().to_string(),
        };

        let extractor = match &self.config.encoder.path {
            Some(path) => Extractor::with_encoder(path.clone()),
            None => Extractor::new(),
        };

        let (tx, rx) = mpsc::channel();
        let handle = extractor.spawn(request, tx);

        self.progress = 0;
        self.progress_message = "Preparing...".to_string();
        self.log.clear();
        self.error_message = None;
        self.events_rx = Some(rx);
        self.job = Some(handle);
        self.state = AppState::Extracting;
    }

    fn cancel_extraction(&mut self) {
        if let Some(job) = &mut self.job {
            job.cancel();
        }
        self.job = None;
        self.events_rx = None;
        self.log.push("Extraction cancelled".to_string());
        self.state = AppState::Settings;
    }

    fn reset(&mut self) {
        self.state = AppState::Home;
        self.input_path = None;
        self.output_path = None;
        self.progress = 0;
        self.progress_message.clear();
        self.log.clear();
        self.error_message = None;
    }

    fn draw(&self, frame: &mut Frame) {
        match self.state {
            AppState::Home => ui::home::draw(frame, self),
            AppState::SelectingFile => ui::file_picker::draw(frame, self),
            AppState::Settings => ui::settings::draw(frame, self),
            AppState::Extracting => ui::progress::draw(frame, self, "EXTRACTING AUDIO"),
            AppState::Done => ui::done::draw(frame, self),
        }
    }
}
