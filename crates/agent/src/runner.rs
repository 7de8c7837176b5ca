// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process execution: spawn, limit, supervise, reap.
//!
//! One child per run. The child becomes its own session and process-group
//! leader before exec, so a forwarded signal reaches everything the command
//! spawned; the parent owns the wall-clock alarm and the wait. The signal
//! plumbing is process-global state, scoped to the run by a guard: one run
//! at a time per invoking process.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::time::Instant;

use nix::sys::resource::{setrlimit, Resource, RLIM_INFINITY};
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::unistd::{alarm, setsid};
use thiserror::Error;
use tracing::debug;

use chore_core::memsize::{parse_size, InvalidSize, DEFAULT_MEMORY_LIMIT};
use chore_core::record::MAX_OUTPUT;
use chore_core::{JobDescriptor, MemorySpec};

/// What the runner hands to the result builder once the child is reaped.
#[derive(Debug)]
pub struct Execution {
    /// Raw wait status for the child, as reported by `wait4(2)`.
    pub status: i32,
    /// Kernel accounting for the terminated child.
    pub rusage: libc::rusage,
    /// Wall-clock seconds measured around the wait.
    pub clock: f64,
    /// Merged stdout+stderr, truncated at [`MAX_OUTPUT`] bytes.
    pub output: String,
    pub output_truncated: bool,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Size(#[from] InvalidSize),
    /// Child setup failed before exec; not a failing command.
    #[error("failed to spawn {command:?}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Process group the forwarding handler signals; 0 while no child is live.
static CHILD_PGID: AtomicI32 = AtomicI32::new(0);
/// Set by the handler when the SIGALRM deadline itself fired.
static DEADLINE_FIRED: AtomicBool = AtomicBool::new(false);

// Async-signal-safe: atomics and killpg only. Whichever of INT/TERM/ALRM
// arrived, the whole child group gets SIGTERM.
extern "C" fn forward_to_group(signo: libc::c_int) {
    if signo == libc::SIGALRM {
        DEADLINE_FIRED.store(true, Ordering::SeqCst);
    }
    let pgid = CHILD_PGID.load(Ordering::SeqCst);
    if pgid > 0 {
        unsafe {
            libc::killpg(pgid, libc::SIGTERM);
        }
    }
}

/// Scoped signal plumbing for one run: publishes the child's group id,
/// installs the forwarding handlers, and arms the alarm. Drop undoes it in
/// reverse: alarm off, previous handlers back, group id cleared, on every
/// exit path.
struct SignalGuard {
    saved: Vec<(Signal, SigAction)>,
}

impl SignalGuard {
    fn arm(pgid: i32, timeout: Option<i64>) -> std::io::Result<Self> {
        CHILD_PGID.store(pgid, Ordering::SeqCst);
        DEADLINE_FIRED.store(false, Ordering::SeqCst);

        let forward = SigAction::new(
            SigHandler::Handler(forward_to_group),
            SaFlags::empty(),
            SigSet::empty(),
        );

        let mut saved = Vec::with_capacity(3);
        for sig in [Signal::SIGINT, Signal::SIGTERM, Signal::SIGALRM] {
            let previous = unsafe { nix::sys::signal::sigaction(sig, &forward) }
                .map_err(std::io::Error::from)?;
            saved.push((sig, previous));
        }

        if let Some(secs) = timeout.filter(|t| *t > 0) {
            alarm::set(secs.min(i64::from(u32::MAX)) as u32);
        }

        Ok(Self { saved })
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        alarm::cancel();
        for (sig, previous) in &self.saved {
            // A failed restore has nowhere to go from a drop path.
            let _ = unsafe { nix::sys::signal::sigaction(*sig, previous) };
        }
        CHILD_PGID.store(0, Ordering::SeqCst);
    }
}

/// Resolve the job's memory ceiling in bytes: explicit byte counts are used
/// verbatim, human strings go through the size grammar, absence means the
/// 1 GiB default.
fn memory_ceiling(desc: &JobDescriptor) -> Result<u64, InvalidSize> {
    match &desc.memory_limit {
        None => Ok(DEFAULT_MEMORY_LIMIT),
        Some(MemorySpec::Bytes(n)) => Ok(*n),
        Some(MemorySpec::Human(s)) => parse_size(s),
    }
}

/// Run the job's command to completion under its configured limits.
pub fn run_job(desc: &JobDescriptor) -> Result<Execution, RunnerError> {
    let ceiling = memory_ceiling(desc)?;

    // Backing store, not a pipe: both streams dup onto the same unnamed
    // file and no reader loop is needed while the child runs.
    let buffer = tempfile::tempfile()?;

    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(&desc.command)
        .stdin(Stdio::null())
        .stdout(Stdio::from(buffer.try_clone()?))
        .stderr(Stdio::from(buffer.try_clone()?))
        .envs(&desc.env);

    // Child branch: runs after fork, before exec, and must not allocate.
    // Session first: group-wide signaling depends on the child leading its
    // own group before anything can be forwarded. Descriptor hygiene is
    // close-on-exec at open time; there is no scrub loop.
    unsafe {
        cmd.pre_exec(move || {
            setsid()?;
            setrlimit(Resource::RLIMIT_AS, ceiling, RLIM_INFINITY)?;
            Ok(())
        });
    }

    let child = cmd
        .spawn()
        .map_err(|source| RunnerError::Spawn { command: desc.command.clone(), source })?;
    let pid = child.id() as libc::pid_t;

    let guard = SignalGuard::arm(pid, desc.timeout)?;

    let started = Instant::now();
    let waited = wait_for(pid);
    let clock = started.elapsed().as_secs_f64();

    // Disarm immediately, before anything else can block: a stale alarm
    // must never fire against a later run.
    alarm::cancel();
    let (status, rusage) = waited?;

    if DEADLINE_FIRED.load(Ordering::SeqCst) {
        debug!(job = %desc.name, timeout = ?desc.timeout, "wall-clock deadline fired");
    }
    drop(guard);
    drop(child);

    let (output, output_truncated) = read_output(buffer)?;
    Ok(Execution { status, rusage, clock, output, output_truncated })
}

/// Block until the OS reports a terminal status for exactly this pid,
/// retrying when an unrelated signal delivery interrupts the wait.
fn wait_for(pid: libc::pid_t) -> std::io::Result<(i32, libc::rusage)> {
    let mut status: libc::c_int = 0;
    let mut rusage: libc::rusage = unsafe { std::mem::zeroed() };
    loop {
        let rc = unsafe { libc::wait4(pid, &mut status, 0, &mut rusage) };
        if rc == pid {
            return Ok((status, rusage));
        }
        let err = std::io::Error::last_os_error();
        if rc == -1 && err.raw_os_error() == Some(libc::EINTR) {
            continue;
        }
        return Err(err);
    }
}

/// Read back at most [`MAX_OUTPUT`] bytes from the start of the buffer,
/// decoding leniently, and record whether the source was larger.
fn read_output(mut buffer: File) -> std::io::Result<(String, bool)> {
    let total = buffer.metadata()?.len();
    buffer.seek(SeekFrom::Start(0))?;

    let mut raw = Vec::with_capacity(total.min(MAX_OUTPUT) as usize);
    buffer.take(MAX_OUTPUT).read_to_end(&mut raw)?;

    Ok((String::from_utf8_lossy(&raw).into_owned(), total > MAX_OUTPUT))
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
