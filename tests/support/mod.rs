#![allow(dead_code)]

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SENDER: &str = "\
sender:
  first_name: Ada
  last_name: Lovelace
  city: London
start_date_iso: 2026-03-01
";

pub const POSITION: &str = "\
recipient:
  company: Acme Corporation
  company_short: Acme Corp.
position: Backend Engineer
initiative: false
";

pub const TEXT_EN: &str = "\
language: en
greeting: \"Dear {{ recipient.company }} team,\"
body: |
  I would like to apply as {{ position }} and can start on {{ start_date }}.
closing: Kind regards
";

pub const TEXT_DE: &str = "\
language: de
greeting: \"Sehr geehrtes Team der {{ recipient.company }},\"
body: |
  hiermit bewerbe ich mich als {{ position }} zum {{ start_date }}.
closing: Mit freundlichen Grüßen
";

pub const TEMPLATE: &str = "\
\\begin{letter}{ {{- recipient.company -}} }
\\opening{ {{- greeting -}} }
{{ body }}
\\closing{ {{- closing -}} }
% {{ sender.first_name }} {{ sender.last_name }}, {{ today }}
\\end{letter}
";

pub const TEMPLATE_NAME: &str = "cover_letter_template.tex.tera";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

/// A throwaway project layout with `context/`, `templates/` and no
/// `renders/` directory yet.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let workspace = Self {
            dir: TempDir::new().expect("temp dir"),
        };
        workspace.write_context("sender_context.yml", SENDER);
        workspace.write_context("position_context.yml", POSITION);
        workspace.write_context("text_context_en.yml", TEXT_EN);
        workspace.write_context("text_context_de.yml", TEXT_DE);
        workspace.write_template(TEMPLATE);
        workspace
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn context_dir(&self) -> PathBuf {
        self.root().join("context")
    }

    pub fn template_dir(&self) -> PathBuf {
        self.root().join("templates")
    }

    pub fn render_dir(&self) -> PathBuf {
        self.root().join("renders")
    }

    pub fn write_context(&self, name: &str, contents: &str) {
        let dir = self.context_dir();
        fs::create_dir_all(&dir).expect("context dir");
        fs::write(dir.join(name), contents).expect("context file written");
    }

    pub fn write_template(&self, contents: &str) {
        let dir = self.template_dir();
        fs::create_dir_all(&dir).expect("template dir");
        fs::write(dir.join(TEMPLATE_NAME), contents).expect("template written");
    }
}
