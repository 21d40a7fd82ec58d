use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use super::command::build_args;
use super::error::ExtractError;
use super::format::AudioFormat;
use super::locator;
use super::progress::{LineOutcome, ProgressParser};
use super::sanitize::sanitize;

/// How long `cancel()` waits for the worker thread to wind down.
const CANCEL_WAIT: Duration = Duration::from_secs(1);

/// One extraction to perform. When `output` is `None` it defaults to the
/// input path with the target format's extension.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub format: AudioFormat,
    pub bitrate: String,
}

/// Terminal outcome of a job: the output path on success, otherwise the
/// failure. Partial output files from failed runs are left on disk.
pub type ExtractionResult = Result<PathBuf, ExtractError>;

/// Events delivered over the job's channel. Progress percents are
/// non-decreasing and always precede the single `Finished` event; a
/// cancelled job stops delivering without a terminal event.
#[derive(Debug)]
pub enum JobEvent {
    Log(String),
    Progress(u8, String),
    Finished(ExtractionResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Running,
    Completed,
    Failed,
    Cancelled,
}

/// Spawns and supervises one ffmpeg job at a time. The worker thread owns
/// the subprocess; callers interact only through the event channel and the
/// returned `JobHandle`.
#[derive(Debug, Default)]
pub struct Extractor {
    encoder: Option<PathBuf>,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip encoder discovery and use the given binary. Used when the
    /// config file pins an ffmpeg path, and by tests with stub encoders.
    pub fn with_encoder(encoder: impl Into<PathBuf>) -> Self {
        Self {
            encoder: Some(encoder.into()),
        }
    }

    /// Start the job on a dedicated background thread. Events arrive on
    /// `events`; the handle supports cooperative cancellation. One handle
    /// supervises exactly one job; submit a second request only after the
    /// first reached a terminal state.
    pub fn spawn(&self, request: ExtractionRequest, events: Sender<JobEvent>) -> JobHandle {
        let stop = Arc::new(AtomicBool::new(false));
        let state = Arc::new(Mutex::new(JobState::Running));
        let child_slot: Arc<Mutex<Option<Child>>> = Arc::new(Mutex::new(None));

        let worker = {
            let stop = Arc::clone(&stop);
            let state = Arc::clone(&state);
            let child_slot = Arc::clone(&child_slot);
            let encoder = self.encoder.clone();
            thread::spawn(move || {
                match run_job(&request, encoder, &stop, &child_slot, &events) {
                    Outcome::Cancelled => {
                        // cancel() owns the transition to Cancelled.
                    }
                    Outcome::Finished(result) => {
                        let mut state = state.lock().expect("job state lock");
                        *state = if result.is_ok() {
                            JobState::Completed
                        } else {
                            JobState::Failed
                        };
                        drop(state);
                        let _ = events.send(JobEvent::Finished(result));
                    }
                }
            })
        };

        JobHandle {
            stop,
            state,
            child: child_slot,
            worker: Some(worker),
        }
    }
}

/// Handle to a running job: the stop flag is the only state shared across
/// the caller/worker boundary besides the child slot used to kill on cancel.
pub struct JobHandle {
    stop: Arc<AtomicBool>,
    state: Arc<Mutex<JobState>>,
    child: Arc<Mutex<Option<Child>>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl JobHandle {
    /// Request cancellation: raise the stop flag, kill the encoder process,
    /// and wait up to one second for the worker to finish. Event delivery
    /// ceases once the worker observes the flag; an event already in flight
    /// may still arrive.
    pub fn cancel(&mut self) {
        self.stop.store(true, Ordering::SeqCst);

        if let Ok(mut slot) = self.child.lock() {
            if let Some(child) = slot.as_mut() {
                let _ = child.kill();
            }
        }

        if let Some(worker) = self.worker.take() {
            let deadline = Instant::now() + CANCEL_WAIT;
            while !worker.is_finished() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(10));
            }
            if worker.is_finished() {
                let _ = worker.join();
            } else {
                self.worker = Some(worker);
            }
        }

        let mut state = self.state.lock().expect("job state lock");
        if *state == JobState::Running {
            *state = JobState::Cancelled;
        }
    }

    pub fn state(&self) -> JobState {
        *self.state.lock().expect("job state lock")
    }

    pub fn is_finished(&self) -> bool {
        self.state() != JobState::Running
    }
}

enum Outcome {
    Finished(ExtractionResult),
    Cancelled,
}

fn run_job(
    request: &ExtractionRequest,
    encoder_override: Option<PathBuf>,
    stop: &AtomicBool,
    child_slot: &Mutex<Option<Child>>,
    events: &Sender<JobEvent>,
) -> Outcome {
    if !request.input.exists() {
        return Outcome::Finished(Err(ExtractError::InputNotFound(request.input.clone())));
    }

    let output = request
        .output
        .clone()
        .unwrap_or_else(|| request.input.with_extension(request.format.extension()));

    // Defensive strip of shell metacharacters, applied even though the
    // encoder is spawned with an argument vector.
    let input = PathBuf::from(sanitize(&request.input.to_string_lossy()));
    let output = PathBuf::from(sanitize(&output.to_string_lossy()));

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Outcome::Finished(Err(e.into()));
            }
        }
    }

    let encoder = match encoder_override.or_else(locator::locate) {
        Some(path) => path,
        None => {
            return Outcome::Finished(Err(ExtractError::EncoderNotFound {
                hint: locator::install_hint(),
            }))
        }
    };

    let _ = events.send(JobEvent::Log("Starting audio extraction...".to_string()));
    let _ = events.send(JobEvent::Log(format!(
        "Format: {}, quality: {}",
        request.format.as_str().to_uppercase(),
        if request.format.is_lossless() {
            "lossless".to_string()
        } else {
            request.bitrate.clone()
        }
    )));

    let args = build_args(&input, &output, request.format, &request.bitrate);
    debug!(encoder = %encoder.display(), ?args, "spawning ffmpeg");

    let spawned = Command::new(&encoder)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => return Outcome::Finished(Err(e.into())),
    };

    // Merge stdout and stderr into one line stream. ffmpeg rewrites its
    // progress line with carriage returns, so the readers split on both
    // `\n` and `\r`.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let mut readers = Vec::new();
    if let Some(stdout) = stdout {
        readers.push(spawn_line_reader(stdout, line_tx.clone()));
    }
    if let Some(stderr) = stderr {
        readers.push(spawn_line_reader(stderr, line_tx.clone()));
    }
    drop(line_tx);

    *child_slot.lock().expect("child slot lock") = Some(child);

    let mut parser = ProgressParser::new();
    for line in line_rx {
        if stop.load(Ordering::SeqCst) {
            reap(child_slot);
            return Outcome::Cancelled;
        }
        match parser.advance(&line) {
            LineOutcome::Progress(percent) => {
                let _ = events.send(JobEvent::Progress(
                    percent,
                    format!("Extracting... {percent}%"),
                ));
            }
            LineOutcome::EncoderError => {
                debug!(%line, "encoder error line, aborting job");
                reap(child_slot);
                for reader in readers {
                    let _ = reader.join();
                }
                return Outcome::Finished(Err(ExtractError::EncoderError(line)));
            }
            LineOutcome::Ignored => {}
        }
    }
    for reader in readers {
        let _ = reader.join();
    }

    let status = match child_slot.lock().expect("child slot lock").take() {
        Some(mut child) => child.wait(),
        None => return Outcome::Cancelled,
    };

    if stop.load(Ordering::SeqCst) {
        return Outcome::Cancelled;
    }

    let status = match status {
        Ok(status) => status,
        Err(e) => return Outcome::Finished(Err(e.into())),
    };
    debug!(?status, "ffmpeg exited");

    if !status.success() {
        let code = status.code().unwrap_or(-1);
        return Outcome::Finished(Err(ExtractError::EncoderExit { code }));
    }

    if parser.last_percent() < 100 {
        let _ = events.send(JobEvent::Progress(100, "Done".to_string()));
    }
    Outcome::Finished(Ok(output))
}

/// Kill and wait the supervised child, if still present.
fn reap(child_slot: &Mutex<Option<Child>>) {
    if let Some(mut child) = child_slot.lock().expect("child slot lock").take() {
        let _ = child.kill();
        let _ = child.wait();
    }
}

/// Read a raw byte stream, splitting on `\n` or `\r`, and forward each
/// non-empty trimmed line. Both readers feed the same channel, which gives
/// the parser the merged diagnostic stream.
fn spawn_line_reader<R>(stream: R, lines: Sender<String>) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(stream);
        let mut pending: Vec<u8> = Vec::new();
        loop {
            let chunk = match reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(_) => break,
            };
            if chunk.is_empty() {
                break;
            }
            let consumed = chunk.len();
            for &byte in chunk {
                if byte == b'\n' || byte == b'\r' {
                    if !flush_line(&mut pending, &lines) {
                        return;
                    }
                } else {
                    pending.push(byte);
                }
            }
            reader.consume(consumed);
        }
        let _ = flush_line(&mut pending, &lines);
    })
}

fn flush_line(pending: &mut Vec<u8>, lines: &Sender<String>) -> bool {
    if pending.is_empty() {
        return true;
    }
    let line = String::from_utf8_lossy(pending).trim().to_string();
    pending.clear();
    if line.is_empty() {
        return true;
    }
    lines.send(line).is_ok()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn stub_encoder(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("ffmpeg-stub");
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn fake_input(dir: &Path) -> PathBuf {
        let input = dir.join("movie.mp4");
        std::fs::write(&input, b"not really a video").unwrap();
        input
    }

    fn request(input: PathBuf) -> ExtractionRequest {
        ExtractionRequest {
            input,
            output: None,
            format: AudioFormat::Mp3,
            bitrate: "192k".to_string(),
        }
    }

    fn collect(rx: mpsc::Receiver<JobEvent>) -> (Vec<u8>, Option<ExtractionResult>) {
        let mut percents = Vec::new();
        let mut result = None;
        for event in rx {
            match event {
                JobEvent::Progress(p, _) => percents.push(p),
                JobEvent::Finished(r) => result = Some(r),
                JobEvent::Log(_) => {}
            }
        }
        (percents, result)
    }

    #[test]
    fn missing_input_fails_without_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = mpsc::channel();
        // The "encoder" is a path that would fail loudly if it were ever run.
        let extractor = Extractor::with_encoder(dir.path().join("no-such-encoder"));
        let handle = extractor.spawn(request(dir.path().join("missing.mp4")), tx);

        let (percents, result) = collect(rx);
        assert!(percents.is_empty());
        assert!(matches!(
            result,
            Some(Err(ExtractError::InputNotFound(_)))
        ));
        assert_eq!(handle.state(), JobState::Failed);
    }

    #[test]
    fn end_to_end_success_event_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let input = fake_input(dir.path());
        let encoder = stub_encoder(
            dir.path(),
            r#"echo "  Duration: 00:01:00.00, start: 0.000000, bitrate: 1000 kb/s" 1>&2
echo "size=     128kB time=00:00:15.00 bitrate= 192.0kbits/s speed=30x" 1>&2
echo "size=     256kB time=00:00:30.00 bitrate= 192.0kbits/s speed=30x" 1>&2
echo "size=     512kB time=00:01:00.00 bitrate= 192.0kbits/s speed=30x" 1>&2
exit 0"#,
        );

        let (tx, rx) = mpsc::channel();
        let handle = Extractor::with_encoder(encoder).spawn(request(input.clone()), tx);

        let (percents, result) = collect(rx);
        assert_eq!(percents, [25, 50, 100]);
        assert_eq!(result.unwrap().unwrap(), input.with_extension("mp3"));
        assert_eq!(handle.state(), JobState::Completed);
    }

    #[test]
    fn synthetic_completion_event_when_stream_stops_early() {
        let dir = tempfile::tempdir().unwrap();
        let input = fake_input(dir.path());
        let encoder = stub_encoder(
            dir.path(),
            r#"echo "  Duration: 00:01:00.00" 1>&2
echo "time=00:00:30.00" 1>&2
exit 0"#,
        );

        let (tx, rx) = mpsc::channel();
        let _handle = Extractor::with_encoder(encoder).spawn(request(input), tx);

        let (percents, result) = collect(rx);
        assert_eq!(percents, [50, 100]);
        assert!(result.unwrap().is_ok());
    }

    #[test]
    fn error_line_short_circuits_the_stream() {
        let dir = tempfile::tempdir().unwrap();
        let input = fake_input(dir.path());
        let encoder = stub_encoder(
            dir.path(),
            r#"echo "  Duration: 00:01:00.00" 1>&2
echo "time=00:00:15.00" 1>&2
echo "Error while decoding stream #0:1: Invalid data found" 1>&2
echo "time=00:00:30.00" 1>&2
exit 1"#,
        );

        let (tx, rx) = mpsc::channel();
        let handle = Extractor::with_encoder(encoder).spawn(request(input), tx);

        let (percents, result) = collect(rx);
        assert_eq!(percents, [25]);
        match result {
            Some(Err(ExtractError::EncoderError(line))) => {
                assert!(line.contains("Error while decoding"));
            }
            other => panic!("expected encoder error, got {other:?}"),
        }
        assert_eq!(handle.state(), JobState::Failed);
    }

    #[test]
    fn nonzero_exit_status_fails_with_code() {
        let dir = tempfile::tempdir().unwrap();
        let input = fake_input(dir.path());
        let encoder = stub_encoder(
            dir.path(),
            r#"echo "  Duration: 00:01:00.00" 1>&2
exit 3"#,
        );

        let (tx, rx) = mpsc::channel();
        let handle = Extractor::with_encoder(encoder).spawn(request(input), tx);

        let (percents, result) = collect(rx);
        assert!(percents.is_empty());
        assert!(matches!(
            result,
            Some(Err(ExtractError::EncoderExit { code: 3 }))
        ));
        assert_eq!(handle.state(), JobState::Failed);
    }

    #[test]
    fn cancel_reaches_terminal_state_without_a_result() {
        let dir = tempfile::tempdir().unwrap();
        let input = fake_input(dir.path());
        let encoder = stub_encoder(
            dir.path(),
            r#"echo "  Duration: 00:10:00.00" 1>&2
sleep 30"#,
        );

        let (tx, rx) = mpsc::channel();
        let mut handle = Extractor::with_encoder(encoder).spawn(request(input), tx);

        // Let the worker get past spawn before cancelling.
        thread::sleep(Duration::from_millis(200));
        let started = Instant::now();
        handle.cancel();
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(handle.state(), JobState::Cancelled);
        assert!(handle.is_finished());

        let (_, result) = collect(rx);
        assert!(result.is_none(), "cancelled job must not emit a result");
    }

    #[test]
    fn output_parent_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let input = fake_input(dir.path());
        let output = dir.path().join("nested").join("deep").join("movie.flac");
        let encoder = stub_encoder(dir.path(), "exit 0");

        let (tx, rx) = mpsc::channel();
        let req = ExtractionRequest {
            input,
            output: Some(output.clone()),
            format: AudioFormat::Flac,
            bitrate: "192k".to_string(),
        };
        let _handle = Extractor::with_encoder(encoder).spawn(req, tx);

        let (_, result) = collect(rx);
        assert_eq!(result.unwrap().unwrap(), output);
        assert!(output.parent().unwrap().is_dir());
    }
}
