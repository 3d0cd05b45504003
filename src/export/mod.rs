// ==========================================
// 批次发货缺口分析 - 外部协作接口层
// ==========================================
// 职责: 图表渲染、邮件投递的接口与默认实现
// ==========================================

pub mod chart_renderer;
pub mod error;
pub mod mailer;

pub use chart_renderer::{ChartRenderer, JsonChartRenderer};
pub use error::{ExportError, ExportResult};
pub use mailer::{compose_report_mail, MailMessage, OutboxMailer, ReportMailer};
