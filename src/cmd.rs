use crate::flags;
use crate::output;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use error_chain::error_chain;
use tracing::{debug, instrument};

error_chain! {
    links {
        OutputError(output::Error, output::ErrorKind);
    }
    errors {
        Spawn(program: PathBuf) {
            description("failed to start command")
            display("Failed to start `{}`", program.display())
        }
        Wait {
            description("failed to wait for command")
            display("Failed to wait for command to finish")
        }
    }
    foreign_links {
        IOError(std::io::Error);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Exit code, or `None` when the child was killed by a signal.
    Failed(Option<i32>),
}

impl From<ExitStatus> for Outcome {
    fn from(status: ExitStatus) -> Outcome {
        if status.success() {
            Outcome::Success
        } else {
            Outcome::Failed(status.code())
        }
    }
}

#[derive(Debug)]
pub struct Report {
    pub output_file: PathBuf,
    pub outcome: Outcome,
}

impl Report {
    pub fn message(&self) -> String {
        let file = self.output_file.display();
        match self.outcome {
            Outcome::Success => format!("Command completed successfully. Output saved to {}.", file),
            Outcome::Failed(Some(code)) => format!("Command failed with return code {}. Check {} for details.", code, file),
            Outcome::Failed(None) => format!("Command was terminated by a signal. Check {} for details.", file),
        }
    }
}

/// `enum -d <domain> -o <output_file>` followed by the passthrough tokens.
pub fn amass_args(f: &flags::Flags, output_file: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "enum".into(),
        "-d".into(),
        f.domain.clone().into(),
        "-o".into(),
        output_file.as_os_str().to_os_string(),
    ];
    args.extend(f.options.tokens().into_iter().map(OsString::from));
    args
}

pub fn command_line(program: &Path, args: &[OsString]) -> String {
    let mut line = program.to_string_lossy().into_owned();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

#[instrument(skip(f), fields(domain = %f.domain))]
pub fn run_amass_enum(f: &flags::Flags) -> Result<Report> {
    output::ensure_output_dir(&f.output_dir)?;
    let output_file = f.output_dir.join(output::generate_output_filename(&f.domain));
    debug!(
        output_file = %output_file.display(),
        output_prefix = %f.output_prefix,
        "output prefix is not applied to the output file"
    );

    let file = output::open_output_file(&output_file)?;
    let args = amass_args(f, &output_file);
    println!("Running command: {}", command_line(&f.program, &args));

    let mut command = Command::new(&f.program);
    command
        .args(&args)
        .stdin(Stdio::null())
        .stdout(file.try_clone()?)
        .stderr(file.try_clone()?);
    debug!(?command, "spawning");
    let mut child = command
        .spawn()
        .chain_err(|| ErrorKind::Spawn(f.program.clone()))?;
    let status = child.wait().chain_err(|| ErrorKind::Wait)?;
    debug!(%status, "command exited");
    // lock is released once the child is done writing
    drop(file);

    Ok(Report {
        output_file,
        outcome: status.into(),
    })
}
