// ==========================================
// 批次发货缺口分析 - 邮件阶段API
// ==========================================
// 流程: 收件人列表 → 组装邮件（分配表 + 图表附件）→ 投递
// 无收件人: 跳过并告警；附件缺失: 中止
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::PipelineConfig;
use crate::export::{compose_report_mail, JsonChartRenderer, OutboxMailer, ReportMailer};
use crate::importer::load_recipients;
use crate::repository::AllocationTableRepository;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// 邮件阶段结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MailOutcome {
    Sent {
        envelope: PathBuf,
        recipients: usize,
        attachments: usize,
    },
    Skipped {
        reason: String,
    },
}

pub struct MailApi {
    config: PipelineConfig,
    mailer: Box<dyn ReportMailer>,
}

impl MailApi {
    /// 默认投递器: 写入 outbox 目录
    pub fn new(config: PipelineConfig) -> Self {
        let mailer = Box::new(OutboxMailer::new(config.paths.outbox_dir()));
        Self::with_mailer(config, mailer)
    }

    pub fn with_mailer(config: PipelineConfig, mailer: Box<dyn ReportMailer>) -> Self {
        Self { config, mailer }
    }

    /// 附件: 每个配置交货类型的分配表与图表文件
    pub fn attachments(&self) -> Vec<PathBuf> {
        let output_dir = self.config.paths.output_dir();
        let tables = AllocationTableRepository::new(&output_dir);
        let charts = JsonChartRenderer::new(&output_dir);

        self.config
            .delivery_types
            .iter()
            .flat_map(|t| [tables.path_for(t), charts.path_for(t)])
            .collect()
    }

    #[instrument(skip_all, fields(report_date = %report_date))]
    pub fn run(&self, report_date: &str) -> ApiResult<MailOutcome> {
        if report_date.trim().is_empty() {
            return Err(ApiError::InvalidInput("报表日期不能为空".to_string()));
        }

        let recipients = load_recipients(&self.config.paths.recipients_file())?;
        if recipients.is_empty() {
            warn!("收件人列表为空，跳过邮件阶段");
            return Ok(MailOutcome::Skipped {
                reason: "收件人列表为空".to_string(),
            });
        }

        let message = compose_report_mail(
            &self.config.mail,
            recipients,
            report_date,
            &self.config.delivery_types,
            self.attachments(),
        );
        let envelope = self.mailer.send(&message)?;

        info!(subject = %message.subject, "邮件阶段完成");

        Ok(MailOutcome::Sent {
            envelope,
            recipients: message.recipients.len(),
            attachments: message.attachments.len(),
        })
    }
}
