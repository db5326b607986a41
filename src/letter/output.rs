use super::naming::OutputName;
use super::LetterError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{info, warn};

const EXCERPT_LINES: usize = 20;

/// Writes the rendered document to `<render_dir>/<stem>.tex`, replacing any
/// earlier draft with the same name.
pub fn write_document(
    render_dir: &Path,
    name: &OutputName,
    contents: &str,
) -> Result<PathBuf, LetterError> {
    fs::create_dir_all(render_dir).map_err(|source| LetterError::Write {
        path: render_dir.to_path_buf(),
        source,
    })?;

    let path = render_dir.join(name.tex_file_name());
    fs::write(&path, contents).map_err(|source| LetterError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), "wrote rendered document");
    Ok(path)
}

#[derive(Debug, Clone)]
pub struct CompileReport {
    pub pdf_path: PathBuf,
    pub status: ExitStatus,
}

/// External typesetting program, run inside the directory that holds the
/// `.tex` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiler {
    program: String,
    args: Vec<String>,
}

impl Compiler {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `lualatex` in non-interactive mode so errors end the run instead of
    /// waiting on stdin.
    pub fn lualatex() -> Self {
        Self::for_program("lualatex")
    }

    /// Uses the non-interactive flag for the TeX engines that understand it
    /// and no extra arguments for anything else.
    pub fn for_program(program: &str) -> Self {
        let args = match Path::new(program).file_stem().and_then(|stem| stem.to_str()) {
            Some("lualatex" | "pdflatex" | "xelatex" | "latex") => {
                vec!["-interaction=nonstopmode".to_string()]
            }
            _ => Vec::new(),
        };
        Self::new(program, args)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn compile(&self, tex_path: &Path) -> Result<CompileReport, LetterError> {
        let working_dir = tex_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = tex_path.file_name().unwrap_or(tex_path.as_os_str());

        info!(program = %self.program, dir = %working_dir.display(), "running compiler");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(file_name)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| LetterError::CompilerSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(LetterError::Compilation {
                program: self.program.clone(),
                status: output.status.to_string(),
                excerpt: excerpt(&output.stdout, &output.stderr),
            });
        }

        let pdf_path = tex_path.with_extension("pdf");
        if pdf_path.exists() {
            info!(path = %pdf_path.display(), "compiled document");
        } else {
            warn!(path = %pdf_path.display(), "compiler succeeded but produced no pdf");
        }

        Ok(CompileReport {
            pdf_path,
            status: output.status,
        })
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::lualatex()
    }
}

fn excerpt(stdout: &[u8], stderr: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = stdout
        .lines()
        .chain(stderr.lines())
        .filter(|line| !line.trim().is_empty())
        .collect();

    let start = lines.len().saturating_sub(EXCERPT_LINES);
    lines[start..].join("\n")
}
