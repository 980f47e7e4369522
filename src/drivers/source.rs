use std::collections::VecDeque;
use std::fmt;
use std::io::{BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::thread::{self, JoinHandle};
use log::{debug, info, warn};
use crate::config::MonitorConfig;
use crate::drivers::channel::SampleSender;
use crate::drivers::parser::parse_line;
use crate::drivers::MonitorError;
/// Program and arguments for the measurement subprocess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SamplerCommand {
    pub program: String,
    pub args: Vec<String>,
}
impl SamplerCommand {
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
    /// `turbostat --Summary --quiet --show <metric> --interval <secs>`,
    /// wrapped in `sudo` unless the config says otherwise.
    pub fn turbostat(config: &MonitorConfig) -> Self {
        let interval = config.sample_interval_secs.to_string();
        let tool_args = [
            "--Summary",
            "--quiet",
            "--show",
            config.metric.as_str(),
            "--interval",
            interval.as_str(),
        ];
        if config.use_sudo {
            let mut args = vec!["turbostat".to_owned()];
            args.extend(tool_args.iter().map(|s| s.to_string()));
            Self::new("sudo", args)
        } else {
            Self::new("turbostat", tool_args)
        }
    }
}
impl fmt::Display for SamplerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
/// Something that yields raw text lines until it runs dry.
pub trait LineSource {
    fn next_line(&mut self) -> Result<Option<String>, MonitorError>;
    /// Called once after the last line; describes why the stream ended.
    fn finish(&mut self) -> String {
        "stream ended".to_owned()
    }
}
/// A running measurement subprocess with its stdout exposed line by line.
pub struct SamplerProcess {
    child: Child,
    stdout: BufReader<ChildStdout>,
    line: Vec<u8>,
}
impl SamplerProcess {
    pub fn spawn(command: &SamplerCommand) -> Result<Self, MonitorError> {
        info!("launching sampler: {command}");
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| MonitorError::SamplerLaunch {
                command: command.to_string(),
                source,
            })?;
        let stdout = child.stdout.take().ok_or(MonitorError::SamplerIo)?;
        Ok(Self {
            child,
            stdout: BufReader::new(stdout),
            line: Vec::new(),
        })
    }
}
impl LineSource for SamplerProcess {
    fn next_line(&mut self) -> Result<Option<String>, MonitorError> {
        self.line.clear();
        match self.stdout.read_until(b'\n', &mut self.line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(String::from_utf8_lossy(&self.line).into_owned())),
            Err(err) => {
                warn!("sampler stdout read failed: {err}");
                Ok(None)
            }
        }
    }
    fn finish(&mut self) -> String {
        match self.child.wait() {
            Ok(status) => status.to_string(),
            Err(err) => format!("wait failed: {err}"),
        }
    }
}
/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<String>,
}
impl ManualSource {
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            queue: lines.into_iter().map(Into::into).collect(),
        }
    }
}
impl LineSource for ManualSource {
    fn next_line(&mut self) -> Result<Option<String>, MonitorError> {
        Ok(self.queue.pop_front())
    }
}
/// Parse every line from `source` into the channel until the stream ends or
/// the consumer goes away. Returns the number of samples sent.
pub fn pump_lines<S: LineSource>(source: &mut S, tx: &SampleSender) -> usize {
    let mut sent = 0;
    while let Ok(Some(line)) = source.next_line() {
        let Some(value) = parse_line(&line) else {
            debug!("dropping sampler line {:?}", line.trim_end());
            continue;
        };
        if !tx.send_sample(value) {
            return sent;
        }
        sent += 1;
    }
    let reason = source.finish();
    warn!("sampler stream ended ({reason}) after {sent} samples");
    tx.send_stopped(reason);
    sent
}
/// Run the producer side on its own thread.
pub fn spawn_sampler<S>(mut source: S, tx: SampleSender) -> std::io::Result<JoinHandle<usize>>
where
    S: LineSource + Send + 'static,
{
    thread::Builder::new()
        .name("sampler".to_owned())
        .spawn(move || pump_lines(&mut source, &tx))
}
