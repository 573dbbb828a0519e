use crate::domain::entity::email_request::EmailRequest;
use crate::domain::entity::user::User;
use crate::infrastructure::queue::EmailQueue;

use super::template::{replace_tokens, extract_subject, EmailTemplate, TemplateStore, Token};

/// Renders a template for one user and hands the result to the mail
/// queue. Sending happens asynchronously in the SMTP consumer.
pub struct EmailComposer {
    store: TemplateStore,
    queue: EmailQueue,
    from_address: String,
}

impl EmailComposer {
    pub fn new(store: TemplateStore, queue: EmailQueue, from_address: String) -> Self {
        Self {
            store,
            queue,
            from_address,
        }
    }

    pub fn compose_and_enqueue(
        &self,
        template: EmailTemplate,
        user: &User,
        tokens: &[Token],
    ) -> anyhow::Result<()> {
        let html = self.store.load(template, &user.two_letter_culture())?;
        let body = replace_tokens(&html, tokens);
        let subject =
            extract_subject(&body).unwrap_or_else(|| template.as_str().to_string());

        self.queue.enqueue(EmailRequest::new(
            subject,
            body,
            self.from_address.clone(),
            vec![user.email.clone()],
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::channel_set::ChannelSet;

    fn store_with_default(dir: &std::path::Path) -> TemplateStore {
        std::fs::create_dir_all(dir.join("en")).unwrap();
        std::fs::write(
            dir.join("en").join("ResetPassword.html"),
            "<html><head><title>Reset your password</title></head>\
             <body><a href=\"{{callbackUrl}}\">Reset</a></body></html>",
        )
        .unwrap();
        TemplateStore::new(dir, "en")
    }

    #[tokio::test]
    async fn composes_rendered_request_for_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_default(dir.path());
        let (queue, mut rx) = EmailQueue::channel();
        let composer = EmailComposer::new(store, queue, "no-reply@econoflow.app".to_string());

        let user = User::new(
            "ana@example.com".to_string(),
            "en-US".to_string(),
            ChannelSet::EMAIL,
        );
        composer
            .compose_and_enqueue(
                EmailTemplate::ResetPassword,
                &user,
                &[Token::new("callbackUrl", "https://econoflow.app/reset/42")],
            )
            .unwrap();

        let request = rx.recv().await.unwrap();
        assert_eq!(request.subject, "Reset your password");
        assert_eq!(request.from, "no-reply@econoflow.app");
        assert_eq!(request.to, vec!["ana@example.com".to_string()]);
        assert!(request.body.contains("https://econoflow.app/reset/42"));
        assert!(!request.body.contains("{{callbackUrl}}"));
    }

    #[tokio::test]
    async fn missing_template_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(dir.path(), "en");
        let (queue, mut rx) = EmailQueue::channel();
        let composer = EmailComposer::new(store, queue, "no-reply@econoflow.app".to_string());

        let user = User::new(
            "ana@example.com".to_string(),
            "en-US".to_string(),
            ChannelSet::EMAIL,
        );
        let result = composer.compose_and_enqueue(EmailTemplate::ResetPassword, &user, &[]);
        assert!(result.is_err());
        assert!(rx.try_recv().is_err());
    }
}
