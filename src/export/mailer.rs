// ==========================================
// 批次发货缺口分析 - 报表邮件
// ==========================================
// 职责: 组装报表邮件并交给投递器
// 默认投递器: 写 JSON 信封到 outbox 目录,由外部中继发送
// ==========================================

use crate::config::MailSettings;
use crate::export::error::{ExportError, ExportResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// 邮件信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailMessage {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<PathBuf>,
}

/// 组装报表邮件
///
/// 主题: "<subject_prefix> <报表日期>"
/// 正文: "Batch Delivery Failures for ZLFA and ZLFS attached"
pub fn compose_report_mail(
    settings: &MailSettings,
    recipients: Vec<String>,
    report_date: &str,
    delivery_types: &[String],
    attachments: Vec<PathBuf>,
) -> MailMessage {
    MailMessage {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        sender: settings.sender.clone(),
        recipients,
        subject: format!("{} {}", settings.subject_prefix.trim_end(), report_date.trim()),
        body: format!(
            "Batch Delivery Failures for {} attached",
            delivery_types.join(" and ")
        ),
        attachments,
    }
}

/// 邮件投递器
pub trait ReportMailer {
    fn send(&self, message: &MailMessage) -> ExportResult<PathBuf>;
}

pub struct OutboxMailer {
    outbox_dir: PathBuf,
}

impl OutboxMailer {
    pub fn new<P: AsRef<Path>>(outbox_dir: P) -> Self {
        Self {
            outbox_dir: outbox_dir.as_ref().to_path_buf(),
        }
    }
}

impl ReportMailer for OutboxMailer {
    fn send(&self, message: &MailMessage) -> ExportResult<PathBuf> {
        // 附件缺失即中止
        for attachment in &message.attachments {
            if !attachment.is_file() {
                return Err(ExportError::MissingAttachment {
                    path: attachment.display().to_string(),
                });
            }
        }

        fs::create_dir_all(&self.outbox_dir)?;
        let path = self.outbox_dir.join(format!(
            "{}_{}.json",
            message.created_at.format("%Y%m%d%H%M%S"),
            message.id
        ));
        fs::write(&path, serde_json::to_string_pretty(message)?)?;

        info!(
            recipients = message.recipients.len(),
            attachments = message.attachments.len(),
            file = %path.display(),
            "邮件已投递到 outbox"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types() -> Vec<String> {
        vec!["ZLFA".to_string(), "ZLFS".to_string()]
    }

    #[test]
    fn test_compose_subject_and_body() {
        let msg = compose_report_mail(
            &MailSettings::default(),
            vec!["a@example.com".to_string()],
            "19/10/2026",
            &types(),
            Vec::new(),
        );

        assert_eq!(msg.subject, "Batch Delivery Failures for 19/10/2026");
        assert_eq!(msg.body, "Batch Delivery Failures for ZLFA and ZLFS attached");
        assert_eq!(msg.sender, "reports@localhost");
    }

    #[test]
    fn test_outbox_writes_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let attachment = dir.path().join("full_analysis_output_zlfa.csv");
        fs::write(&attachment, "Material,Diff,Str_Area,Avail_st,_merge,Net\n").unwrap();

        let msg = compose_report_mail(
            &MailSettings::default(),
            vec!["a@example.com".to_string()],
            "today",
            &types(),
            vec![attachment],
        );
        let mailer = OutboxMailer::new(dir.path().join("outbox"));
        let path = mailer.send(&msg).unwrap();

        let back: MailMessage = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_missing_attachment_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let msg = compose_report_mail(
            &MailSettings::default(),
            vec!["a@example.com".to_string()],
            "today",
            &types(),
            vec![dir.path().join("chart_zlfs.json")],
        );

        let result = OutboxMailer::new(dir.path().join("outbox")).send(&msg);
        assert!(matches!(result, Err(ExportError::MissingAttachment { .. })));
        assert!(!dir.path().join("outbox").exists());
    }
}
