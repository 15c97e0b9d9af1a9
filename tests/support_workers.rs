use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

pub struct WorkerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// What the stub worker reports for each job.
#[derive(Debug, Clone, Copy)]
pub struct StubProfile {
    pub requests_per_second: f64,
    pub mean_time_per_request_ms: f64,
    pub fastest_ms: f64,
    pub slowest_ms: f64,
}

impl StubProfile {
    /// 60 req/s at 450 ms mean, latencies spread over 100..900 ms.
    pub const STEADY: Self = Self {
        requests_per_second: 60.0,
        mean_time_per_request_ms: 450.0,
        fastest_ms: 100.0,
        slowest_ms: 900.0,
    };
}

/// Spawn a worker stub that answers every `attack` line with a `report`
/// covering the full assigned slice.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_worker(profile: StubProfile) -> Result<(String, WorkerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind worker stub failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("worker addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_job(stream, profile));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        addr.to_string(),
        WorkerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn handle_job(stream: TcpStream, profile: StubProfile) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let Ok(read_half) = stream.try_clone() else {
        return;
    };
    let mut line = String::new();
    if BufReader::new(read_half).read_line(&mut line).is_err() {
        return;
    }
    let Ok(request) = serde_json::from_str::<serde_json::Value>(&line) else {
        return;
    };
    let requests = request["assignment"]["requests"].as_u64().unwrap_or(0);
    let worker_id = request["worker_id"].as_str().unwrap_or("unknown").to_owned();

    let steps = 99.0;
    let percentiles: Vec<f64> = (0..100)
        .map(|idx| {
            profile.fastest_ms + (profile.slowest_ms - profile.fastest_ms) * f64::from(idx) / steps
        })
        .collect();
    let reply = serde_json::json!({
        "type": "report",
        "worker_id": worker_id,
        "sample": {
            "complete_requests": requests,
            "failed_requests": { "connect": 0, "receive": 0, "length": 0, "exceptions": 0 },
            "response_codes": { "2xx": requests, "3xx": 0, "4xx": 0, "5xx": 0 },
            "requests_per_second": profile.requests_per_second,
            "mean_time_per_request_ms": profile.mean_time_per_request_ms,
            "latency_percentiles": percentiles,
        }
    });

    let mut stream = stream;
    if writeln!(stream, "{}", reply).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// An address nothing is listening on.
///
/// # Errors
///
/// Returns an error if a local port cannot be allocated.
pub fn dead_address() -> Result<String, String> {
    TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind port failed: {}", err))?
        .local_addr()
        .map_err(|err| format!("port addr failed: {}", err))
        .map(|addr| addr.to_string())
}

/// Spawn the `swarm` binary and capture output.
///
/// # Errors
///
/// Returns an error if the process cannot be started.
pub fn spawn_swarm<I, S>(args: I) -> Result<Child, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = swarm_bin()?;
    Command::new(bin)
        .args(args)
        .env("SWARM_LOG", "error")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| format!("spawn swarm failed: {}", err))
}

/// Wait for a child process to exit.
///
/// # Errors
///
/// Returns an error if waiting fails or the timeout is exceeded.
pub fn wait_for_exit(child: &mut Child, timeout: Duration) -> Result<ExitStatus, String> {
    let start = Instant::now();
    loop {
        if let Some(status) = child
            .try_wait()
            .map_err(|err| format!("wait failed: {}", err))?
        {
            return Ok(status);
        }
        if start.elapsed() > timeout {
            drop(child.kill());
            return Err("process timed out".to_owned());
        }
        thread::sleep(Duration::from_millis(50));
    }
}

/// Read captured stdout/stderr from a child.
///
/// # Errors
///
/// Returns an error if the streams cannot be read.
pub fn read_child_output(child: &mut Child) -> Result<(String, String), String> {
    let mut stdout = String::new();
    if let Some(mut out) = child.stdout.take() {
        out.read_to_string(&mut stdout)
            .map_err(|err| format!("read stdout failed: {}", err))?;
    }
    let mut stderr = String::new();
    if let Some(mut err_out) = child.stderr.take() {
        err_out
            .read_to_string(&mut stderr)
            .map_err(|err| format!("read stderr failed: {}", err))?;
    }
    Ok((stdout, stderr))
}

fn swarm_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_swarm").map_or_else(
        || Err("CARGO_BIN_EXE_swarm missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
