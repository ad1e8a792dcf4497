//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{Credential, VerificationStatus};
use crate::core::services::{DoctorListing, WorkflowState};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn paint_status(status: VerificationStatus) -> colored::ColoredString {
    match status {
        VerificationStatus::Pending => status.as_str().yellow(),
        VerificationStatus::Verified => status.as_str().green(),
        VerificationStatus::Rejected => status.as_str().red(),
    }
}

/// A doctor's verification status
#[derive(Debug, Serialize)]
pub struct StatusReport {
    /// Doctor email
    pub email: String,
    /// Doctor name
    pub full_name: String,
    /// Workflow state
    pub state: WorkflowState,
    /// Profile ID, if registered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    /// Reviewer notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Client path the doctor is routed to
    pub route: String,
    /// Credential statuses disagree with the profile status
    pub statuses_diverge: bool,
    /// Uploaded credentials
    pub credentials: Vec<Credential>,
}

impl StatusReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        println!("{} <{}>", self.full_name.bold(), self.email);
        let state = match self.state {
            WorkflowState::Unregistered => "unregistered".dimmed(),
            WorkflowState::Pending => paint_status(VerificationStatus::Pending),
            WorkflowState::Verified => paint_status(VerificationStatus::Verified),
            WorkflowState::Rejected => paint_status(VerificationStatus::Rejected),
        };
        println!("  Status:  {state}");
        if let Some(id) = &self.profile_id {
            println!("  Profile: {id}");
        }
        if let Some(notes) = &self.notes {
            println!("  Notes:   {notes}");
        }
        println!("  Route:   {}", self.route);

        if !self.credentials.is_empty() {
            println!("\n  Credentials:");
            for c in &self.credentials {
                println!(
                    "    [{}] {} ({}) {}",
                    paint_status(c.verification_status),
                    c.credential_type.label(),
                    c.file_name,
                    c.id.dimmed()
                );
            }
        }
        if self.statuses_diverge {
            println!(
                "\n  {} credential statuses differ from the profile status",
                "note:".yellow()
            );
        }
    }
}

/// A list of verified doctors
#[derive(Debug, Serialize)]
pub struct DoctorListResult {
    /// Matching doctors
    pub doctors: Vec<DoctorListing>,
}

impl DoctorListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.doctors.is_empty() {
            println!("No verified doctors found.");
            return;
        }
        for d in &self.doctors {
            println!("{} <{}>", d.full_name.bold(), d.email);
            println!(
                "  {} | {} years | {}",
                d.specializations.join(", "),
                d.experience_years,
                d.languages.join(", ")
            );
            if d.teleconsult_available {
                println!("  {}", "teleconsult available".cyan());
            }
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Successful result
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human if self.success => println!("{} {}", "✓".green(), self.message),
            OutputMode::Human => println!("{} {}", "✗".red(), self.message),
            OutputMode::Json => print_json(self),
        }
    }
}
