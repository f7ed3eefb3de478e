use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::{
    SmtpTransport, Transport,
    message::{Attachment, Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::{
    config::config_model::Smtp,
    domain::{repositories::email::EmailSender, value_objects::notifications::EmailMessage},
};

pub struct LettreEmailSender {
    transport: SmtpTransport,
    from: Mailbox,
}

impl LettreEmailSender {
    pub fn new(config: &Smtp) -> Result<Self> {
        let mut builder = if config.use_tls {
            SmtpTransport::relay(&config.host)
                .context("Invalid SMTP host")?
                .port(config.port)
        } else {
            SmtpTransport::builder_dangerous(&config.host).port(config.port)
        };

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        let from = config
            .from_address
            .parse()
            .context("Invalid SMTP from address")?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl EmailSender for LettreEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        let to: Mailbox = message
            .to
            .parse()
            .with_context(|| format!("Invalid recipient address: {}", message.to))?;

        let builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject);

        let email = match message.attachment {
            Some(attachment) => builder.multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::html(message.html))
                    .singlepart(
                        Attachment::new(attachment.filename)
                            .body(attachment.bytes, ContentType::parse("application/pdf")?),
                    ),
            )?,
            None => builder
                .header(ContentType::TEXT_HTML)
                .body(message.html)?,
        };

        // The sync transport blocks on the SMTP round trip; keep it off the
        // async runtime.
        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&email)).await??;

        Ok(())
    }
}
