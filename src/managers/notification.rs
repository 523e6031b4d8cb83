//! Webhook notification manager
//!
//! Renders JSON templates with placeholder substitution and posts them to a
//! webhook endpoint, optionally attaching the backup archive.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::{Config, NotificationKind};
use crate::utils::size::bytes_to_mb;
use crate::utils::timestamp;

/// Webhook attachment size limit (Discord allows 10MB per file).
const MAX_WEBHOOK_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// HTTP request timeout for webhook posts.
const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(30);

/// A single pipeline event to report.
#[derive(Debug, Clone)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub database: String,
    pub filepath: Option<PathBuf>,
    pub error_message: Option<String>,
    pub db_size: Option<String>,
    pub file_size: Option<String>,
}

impl NotificationEvent {
    pub fn success(database: &str, filepath: &Path, db_size: &str, file_size: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            database: database.to_string(),
            filepath: Some(filepath.to_path_buf()),
            error_message: None,
            db_size: Some(db_size.to_string()),
            file_size: Some(file_size.to_string()),
        }
    }

    pub fn error(database: &str, filepath: &Path, error_message: &str) -> Self {
        Self {
            kind: NotificationKind::Error,
            database: database.to_string(),
            filepath: Some(filepath.to_path_buf()),
            error_message: Some(error_message.to_string()),
            db_size: None,
            file_size: None,
        }
    }

    pub fn upload(database: &str, filepath: &Path, db_size: &str, file_size: &str) -> Self {
        Self {
            kind: NotificationKind::Upload,
            database: database.to_string(),
            filepath: Some(filepath.to_path_buf()),
            error_message: None,
            db_size: Some(db_size.to_string()),
            file_size: Some(file_size.to_string()),
        }
    }

    pub fn with_db_size(mut self, db_size: &str) -> Self {
        self.db_size = Some(db_size.to_string());
        self
    }
}

/// Sink for pipeline notifications.
///
/// Delivery is fire-and-forget: the return value reports whether the webhook
/// was delivered, and the orchestrator never acts on it.
pub trait Notify: Send + Sync {
    fn notify(&self, event: &NotificationEvent) -> bool;
}

/// Notifier posting rendered templates to a configured webhook URL.
pub struct WebhookNotifier {
    enabled: bool,
    webhook_url: String,
    templates: HashMap<NotificationKind, PathBuf>,
    timezone: Tz,
}

impl WebhookNotifier {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enabled: config.enable_webhook,
            webhook_url: config.webhook_url.clone(),
            templates: config.webhook_templates.clone(),
            timezone: timestamp::resolve_timezone(&config.timezone),
        }
    }

    fn build_replacements(&self, event: &NotificationEvent) -> HashMap<&'static str, String> {
        let mut replacements = HashMap::new();
        replacements.insert("database", event.database.clone());
        replacements.insert(
            "filepath",
            event
                .filepath
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        );
        replacements.insert("timestamp", timestamp::readable_timestamp(self.timezone));
        replacements.insert("iso_timestamp", timestamp::iso_timestamp(self.timezone));
        replacements.insert("status", event.kind.status_label().to_string());
        replacements.insert(
            "error_message",
            event
                .error_message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
        );
        replacements.insert(
            "db_size",
            event.db_size.clone().unwrap_or_else(|| "N/A".to_string()),
        );
        replacements.insert(
            "file_size",
            event.file_size.clone().unwrap_or_else(|| "N/A".to_string()),
        );
        replacements
    }

    /// Attachment candidate: only upload events with an existing file.
    fn attachment(&self, event: &NotificationEvent) -> Option<PathBuf> {
        if event.kind != NotificationKind::Upload {
            return None;
        }
        event.filepath.clone().filter(|p| p.exists())
    }

    fn post_json(&self, payload: &Value) -> Result<bool> {
        let client = reqwest::blocking::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        let response = client
            .post(&self.webhook_url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .context("Failed to send webhook")?;

        Ok(self.check_response(response))
    }

    fn post_with_file(&self, payload: &Value, file_path: &Path) -> Result<bool> {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "backup.tar.gz".to_string());

        let bytes = fs::read(file_path)
            .with_context(|| format!("Failed to read attachment: {}", file_path.display()))?;

        let form = reqwest::blocking::multipart::Form::new()
            .part(
                "file",
                reqwest::blocking::multipart::Part::bytes(bytes).file_name(file_name),
            )
            .text("payload_json", payload.to_string());

        let client = reqwest::blocking::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        let response = client
            .post(&self.webhook_url)
            .multipart(form)
            .send()
            .context("Failed to send webhook with attachment")?;

        Ok(self.check_response(response))
    }

    fn check_response(&self, response: reqwest::blocking::Response) -> bool {
        let status = response.status().as_u16();
        if is_success_status(status) {
            debug!("Webhook sent successfully");
            true
        } else {
            let body = response.text().unwrap_or_default();
            error!("Webhook failed with status {}: {}", status, body);
            false
        }
    }

    /// Render the payload and apply the attachment size policy.
    ///
    /// Contract quirk, preserved from the original behavior: when an upload
    /// attachment exceeds the 10MB webhook limit, the notification is sent
    /// WITHOUT the file, with the `filepath` placeholder annotated with the
    /// actual size, and the send is still reported as successful. The
    /// oversize condition itself is logged as an error.
    fn plan(&self, event: &NotificationEvent, template: &Value) -> Result<Delivery> {
        let mut replacements = self.build_replacements(event);

        if let Some(file_path) = self.attachment(event) {
            let file_size = fs::metadata(&file_path)
                .with_context(|| format!("Failed to stat attachment: {}", file_path.display()))?
                .len();

            if file_size > MAX_WEBHOOK_FILE_SIZE {
                let size_mb = bytes_to_mb(file_size);
                warn!(
                    "File size ({:.2}MB) exceeds webhook limit (10MB): {}",
                    size_mb,
                    file_path.display()
                );
                info!("Sending notification without file attachment");
                error!(
                    "Cannot upload file to webhook: File size ({:.2}MB) exceeds 10MB limit",
                    size_mb
                );

                let annotated = format!(
                    "{}{}",
                    replacements["filepath"],
                    oversize_annotation(file_size)
                );
                replacements.insert("filepath", annotated);

                return Ok(Delivery::Json(render_template(template, &replacements)));
            }

            info!("Uploading file via webhook ({:.2}MB)", bytes_to_mb(file_size));
            return Ok(Delivery::WithFile {
                payload: render_template(template, &replacements),
                file: file_path,
            });
        }

        Ok(Delivery::Json(render_template(template, &replacements)))
    }

    /// Send one event. Never escalates: all failures are logged and folded
    /// into the boolean result.
    fn send(&self, event: &NotificationEvent) -> Result<bool> {
        if !self.enabled {
            debug!("Webhook notifications are disabled");
            return Ok(false);
        }

        if self.webhook_url.is_empty() {
            warn!("Webhook URL not configured");
            return Ok(false);
        }

        let Some(template_path) = self.templates.get(&event.kind) else {
            warn!(
                "No template configured for notification type: {}",
                event.kind.status_label()
            );
            return Ok(false);
        };

        let template = match read_template(template_path) {
            Ok(template) => template,
            Err(e) => {
                error!(
                    "Failed to load webhook template {}: {:#}",
                    template_path.display(),
                    e
                );
                return Ok(false);
            }
        };

        match self.plan(event, &template)? {
            Delivery::Json(payload) => self.post_json(&payload),
            Delivery::WithFile { payload, file } => self.post_with_file(&payload, &file),
        }
    }
}

/// How a rendered notification goes over the wire.
#[derive(Debug)]
enum Delivery {
    /// Plain JSON post.
    Json(Value),
    /// Multipart form with the file attached alongside the payload.
    WithFile { payload: Value, file: PathBuf },
}

impl Notify for WebhookNotifier {
    fn notify(&self, event: &NotificationEvent) -> bool {
        match self.send(event) {
            Ok(sent) => {
                if sent {
                    info!(
                        "Sent {} notification for database '{}'",
                        event.kind.status_label(),
                        event.database
                    );
                }
                sent
            }
            Err(e) => {
                error!("Failed to send webhook: {:#}", e);
                false
            }
        }
    }
}

fn read_template(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Webhook template not found: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid JSON in webhook template: {}", path.display()))
}

/// Annotation appended to the `filepath` placeholder for oversized uploads.
fn oversize_annotation(file_size: u64) -> String {
    format!(
        " (File size: {:.2}MB - Too large to upload via webhook, max 10MB)",
        bytes_to_mb(file_size)
    )
}

fn is_success_status(status: u16) -> bool {
    status == 200 || status == 204
}

/// Substitute `{{placeholder}}` tokens through every string leaf of a JSON
/// tree, objects and arrays included. Non-string leaves pass through.
pub fn render_template(template: &Value, replacements: &HashMap<&str, String>) -> Value {
    match template {
        Value::String(s) => {
            let mut rendered = s.clone();
            for (placeholder, replacement) in replacements {
                rendered = rendered.replace(&format!("{{{{{}}}}}", placeholder), replacement);
            }
            Value::String(rendered)
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), render_template(v, replacements)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| render_template(item, replacements))
                .collect(),
        ),
        other => other.clone(),
    }
}
