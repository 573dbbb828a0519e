use std::path::PathBuf;

use anyhow::Context;

/// The closed set of deployed email templates. A notification's
/// `code_message` must name one of these; anything else is reported as
/// "template not found" by the email channel rather than crashing the
/// pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    Default,
    ResetPassword,
    ConfirmEmail,
    ReceivedInvitation,
    GrantedAccess,
    AccessLevelChanged,
    NewSupportMessageReceived,
    WelcomeMessage,
    MonthlyAndAnnualOverviewNowAvailableMessage,
    TwoFactorNowAvailableAnnouncementMessage,
}

impl EmailTemplate {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "Default" => Some(EmailTemplate::Default),
            "ResetPassword" => Some(EmailTemplate::ResetPassword),
            "ConfirmEmail" => Some(EmailTemplate::ConfirmEmail),
            "ReceivedInvitation" => Some(EmailTemplate::ReceivedInvitation),
            "GrantedAccess" => Some(EmailTemplate::GrantedAccess),
            "AccessLevelChanged" => Some(EmailTemplate::AccessLevelChanged),
            "NewSupportMessageReceived" => Some(EmailTemplate::NewSupportMessageReceived),
            "WelcomeMessage" => Some(EmailTemplate::WelcomeMessage),
            "MonthlyAndAnnualOverviewNowAvailableMessage" => {
                Some(EmailTemplate::MonthlyAndAnnualOverviewNowAvailableMessage)
            }
            "TwoFactorNowAvailableAnnouncementMessage" => {
                Some(EmailTemplate::TwoFactorNowAvailableAnnouncementMessage)
            }
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EmailTemplate::Default => "Default",
            EmailTemplate::ResetPassword => "ResetPassword",
            EmailTemplate::ConfirmEmail => "ConfirmEmail",
            EmailTemplate::ReceivedInvitation => "ReceivedInvitation",
            EmailTemplate::GrantedAccess => "GrantedAccess",
            EmailTemplate::AccessLevelChanged => "AccessLevelChanged",
            EmailTemplate::NewSupportMessageReceived => "NewSupportMessageReceived",
            EmailTemplate::WelcomeMessage => "WelcomeMessage",
            EmailTemplate::MonthlyAndAnnualOverviewNowAvailableMessage => {
                "MonthlyAndAnnualOverviewNowAvailableMessage"
            }
            EmailTemplate::TwoFactorNowAvailableAnnouncementMessage => {
                "TwoFactorNowAvailableAnnouncementMessage"
            }
        }
    }

    fn file_name(self) -> String {
        format!("{}.html", self.as_str())
    }
}

/// A `{{placeholder}}` / replacement pair for template rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub placeholder: String,
    pub value: String,
}

impl Token {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            placeholder: format!("{{{{{name}}}}}"),
            value: value.to_string(),
        }
    }
}

/// Extracts token pairs from a notification's metadata: a flat JSON
/// object whose string values become replacements keyed by `{{key}}`.
/// Malformed metadata and non-string values are skipped, never an error.
pub fn tokens_from_metadata(metadata: Option<&str>) -> Vec<Token> {
    let Some(raw) = metadata else {
        return Vec::new();
    };
    let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(raw) else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(key, value)| value.as_str().map(|v| Token::new(key, v)))
        .collect()
}

/// Replaces every occurrence of each token's placeholder. Placeholders
/// with no matching token are left untouched.
pub fn replace_tokens(body: &str, tokens: &[Token]) -> String {
    let mut rendered = body.to_string();
    for token in tokens {
        rendered = rendered.replace(&token.placeholder, &token.value);
    }
    rendered
}

/// The `<title>` text of a rendered template, used as the email subject.
pub fn extract_subject(html: &str) -> Option<String> {
    let start = html.find("<title>")? + "<title>".len();
    let end = html[start..].find("</title>")? + start;
    let title = html[start..end].trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Locates deployed template files by culture:
/// `{base}/{two_letter_culture}/{TemplateName}.html`, falling back to the
/// default culture's directory. Templates are deployment artifacts; a
/// file missing in both locations is a configuration fault and surfaces
/// as an error.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    base_path: PathBuf,
    default_culture: String,
}

impl TemplateStore {
    pub fn new(base_path: impl Into<PathBuf>, default_culture: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            default_culture: default_culture.into(),
        }
    }

    pub fn load(&self, template: EmailTemplate, culture: &str) -> anyhow::Result<String> {
        let localized = self.base_path.join(culture).join(template.file_name());
        let path = if localized.is_file() {
            localized
        } else {
            self.base_path
                .join(&self.default_culture)
                .join(template.file_name())
        };
        std::fs::read_to_string(&path)
            .with_context(|| format!("email template missing: {}", path.display()))
    }
}
