use std::path::PathBuf;
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, Stdio};

use cornice_core::CompatResult;

/// Launch parameters for a child process.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Executable to run. Resolved against `PATH` when relative.
    pub path: PathBuf,
    /// Arguments, not including the executable itself.
    pub args: Vec<String>,
    /// Working directory; inherited from the host when `None`.
    pub working_dir: Option<PathBuf>,
    /// Extra environment entries layered over the host environment.
    pub environment: Vec<(String, String)>,
}

/// A spawned child process with redirected standard streams.
///
/// All three streams are piped. Dropping the handle releases it without
/// touching the child: a host that only wanted to fire-and-forget lets
/// the process run on, exactly like closing a process handle.
pub struct SpawnedProcess {
    child: Child,
}

impl SpawnedProcess {
    /// Spawns the process described by `options`.
    ///
    /// The working directory must exist at spawn time; a dangling path
    /// is reported before the executable is ever invoked.
    pub fn spawn(options: &ProcessOptions) -> CompatResult<Self> {
        let mut command = Command::new(&options.path);
        command
            .args(&options.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &options.working_dir {
            if !dir.is_dir() {
                return Err(format!("working directory {} does not exist", dir.display()).into());
            }
            command.current_dir(dir);
        }
        for (key, value) in &options.environment {
            command.env(key, value);
        }

        let child = command.spawn()?;
        cornice_core::log_debug!(
            "spawned {} (pid {})",
            options.path.display(),
            child.id()
        );

        Ok(Self { child })
    }

    /// OS process identifier.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Takes the write end of the child's stdin. Yields once.
    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.child.stdin.take()
    }

    /// Takes the read end of the child's stdout. Yields once.
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Takes the read end of the child's stderr. Yields once.
    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    /// Blocks until the child exits and returns its exit code.
    ///
    /// A child killed by a signal has no code; 255 is reported for it,
    /// matching what [`terminate`](Self::terminate) produces.
    pub fn wait(&mut self) -> CompatResult<i32> {
        let status = self.child.wait()?;
        Ok(status.code().unwrap_or(255))
    }

    /// Force-kills the child and reaps it. Best-effort: a child that
    /// already exited is not an error.
    pub fn terminate(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use std::io::Read;

    use super::*;

    fn shell(script: &str) -> ProcessOptions {
        ProcessOptions {
            path: PathBuf::from("/bin/sh"),
            args: vec!["-c".into(), script.into()],
            ..Default::default()
        }
    }

    #[test]
    fn wait_returns_the_exit_code() {
        let mut process = SpawnedProcess::spawn(&shell("exit 3")).unwrap();

        assert_eq!(process.wait().unwrap(), 3);
    }

    #[test]
    fn stdout_is_piped() {
        let mut process = SpawnedProcess::spawn(&shell("printf hello")).unwrap();

        let mut output = String::new();
        process
            .take_stdout()
            .unwrap()
            .read_to_string(&mut output)
            .unwrap();
        assert_eq!(output, "hello");
        assert_eq!(process.wait().unwrap(), 0);

        // The stream was already taken.
        assert!(process.take_stdout().is_none());
    }

    #[test]
    fn environment_entries_reach_the_child() {
        let mut options = shell("printf \"$CORNICE_TEST_VALUE\"");
        options.environment = vec![("CORNICE_TEST_VALUE".into(), "42".into())];
        let mut process = SpawnedProcess::spawn(&options).unwrap();

        let mut output = String::new();
        process
            .take_stdout()
            .unwrap()
            .read_to_string(&mut output)
            .unwrap();
        assert_eq!(output, "42");
    }

    #[test]
    fn terminate_kills_a_long_runner() {
        let mut process = SpawnedProcess::spawn(&shell("sleep 30")).unwrap();

        process.terminate();

        // Signal death surfaces as the sentinel code.
        assert_eq!(process.wait().unwrap(), 255);
    }

    #[test]
    fn missing_working_directory_is_rejected() {
        let mut options = shell("true");
        options.working_dir = Some(PathBuf::from("/nonexistent/cornice"));

        assert!(SpawnedProcess::spawn(&options).is_err());
    }

    #[test]
    fn missing_executable_is_an_error() {
        let options = ProcessOptions {
            path: PathBuf::from("/nonexistent/cornice-binary"),
            ..Default::default()
        };

        assert!(SpawnedProcess::spawn(&options).is_err());
    }
}
