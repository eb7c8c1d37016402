use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

use super::renderer::Digest;
use crate::config::settings::MailSettings;

/// 隐式 TLS 端口；其余端口一律先明文连接再 STARTTLS 升级
const SMTPS_PORT: u16 = 465;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("邮件地址无效: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("构建邮件失败: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("SMTP 投递失败: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// 投递出口的接口层，流水线不感知具体传输方式
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, digest: &Digest) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    settings: MailSettings,
}

impl SmtpMailer {
    pub fn new(settings: MailSettings) -> Self {
        Self { settings }
    }

    fn build_message(&self, digest: &Digest) -> Result<Message, MailError> {
        let from: Mailbox = format!("每日新闻助手 <{}>", self.settings.sender).parse()?;
        let to: Mailbox = format!("订阅者 <{}>", self.settings.receiver).parse()?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(digest.subject.as_str())
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(digest.html_body.clone()),
            )?;
        Ok(message)
    }

    /// 加密方式只看端口号，不做协议协商
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let creds = Credentials::new(
            self.settings.smtp_user.clone(),
            self.settings.smtp_password.clone(),
        );

        let builder = if self.settings.smtp_port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.settings.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.smtp_host)?
        };

        Ok(builder
            .port(self.settings.smtp_port)
            .credentials(creds)
            .build())
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn deliver(&self, digest: &Digest) -> Result<(), MailError> {
        info!("准备使用SMTP服务 ({}) 发送邮件...", self.settings.smtp_host);
        let message = self.build_message(digest)?;
        let mailer = self.transport()?;
        mailer.send(message).await?;
        info!("邮件发送成功！");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(port: u16) -> MailSettings {
        MailSettings {
            sender: "sender@example.com".to_string(),
            receiver: "receiver@example.com".to_string(),
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: port,
            smtp_user: "sender@example.com".to_string(),
            smtp_password: "secret".to_string(),
        }
    }

    fn digest() -> Digest {
        Digest {
            html_body: "<html><body>ok</body></html>".to_string(),
            subject: "每日全球新闻头条 (2024-05-01)".to_string(),
        }
    }

    #[test]
    fn message_has_single_recipient_and_subject() {
        let mailer = SmtpMailer::new(settings(587));
        let message = mailer.build_message(&digest()).unwrap();

        let envelope = message.envelope();
        assert_eq!(envelope.to().len(), 1);
        assert_eq!(envelope.to()[0].to_string(), "receiver@example.com");

        let headers = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(headers.contains("sender@example.com"));
    }

    #[test]
    fn both_port_branches_build_a_transport() {
        assert!(SmtpMailer::new(settings(465)).transport().is_ok());
        assert!(SmtpMailer::new(settings(587)).transport().is_ok());
    }
}
