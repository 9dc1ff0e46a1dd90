use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeanlinkError {
    EmptyInput(String),
    NotRecognizedDomain(String),
    UrlParse(String),
    ShorteningUnavailable(String),
    CopyGenerationUnavailable(String),
    MissingCredential(String),
    Config(String),
}

impl BeanlinkError {
    /// Stable error code for logs and scripted callers
    pub fn code(&self) -> &'static str {
        match self {
            BeanlinkError::EmptyInput(_) => "E001",
            BeanlinkError::NotRecognizedDomain(_) => "E002",
            BeanlinkError::UrlParse(_) => "E003",
            BeanlinkError::ShorteningUnavailable(_) => "E004",
            BeanlinkError::CopyGenerationUnavailable(_) => "E005",
            BeanlinkError::MissingCredential(_) => "E006",
            BeanlinkError::Config(_) => "E007",
        }
    }

    /// Human-readable error type name
    pub fn error_type(&self) -> &'static str {
        match self {
            BeanlinkError::EmptyInput(_) => "Empty Input",
            BeanlinkError::NotRecognizedDomain(_) => "Domain Not Recognized",
            BeanlinkError::UrlParse(_) => "URL Parse Error",
            BeanlinkError::ShorteningUnavailable(_) => "Shortening Unavailable",
            BeanlinkError::CopyGenerationUnavailable(_) => "Copy Generation Unavailable",
            BeanlinkError::MissingCredential(_) => "Missing Credential",
            BeanlinkError::Config(_) => "Configuration Error",
        }
    }

    /// Error detail message
    pub fn message(&self) -> &str {
        match self {
            BeanlinkError::EmptyInput(msg) => msg,
            BeanlinkError::NotRecognizedDomain(msg) => msg,
            BeanlinkError::UrlParse(msg) => msg,
            BeanlinkError::ShorteningUnavailable(msg) => msg,
            BeanlinkError::CopyGenerationUnavailable(msg) => msg,
            BeanlinkError::MissingCredential(msg) => msg,
            BeanlinkError::Config(msg) => msg,
        }
    }

    /// True for errors the user can fix by correcting the input.
    ///
    /// Everything else has a defined degraded output and is recovered
    /// automatically by the caller.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            BeanlinkError::EmptyInput(_)
                | BeanlinkError::NotRecognizedDomain(_)
                | BeanlinkError::Config(_)
        )
    }

    /// Format as colored terminal output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// Format as plain output
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for BeanlinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for BeanlinkError {}

// Convenience constructors
impl BeanlinkError {
    pub fn empty_input<T: Into<String>>(msg: T) -> Self {
        BeanlinkError::EmptyInput(msg.into())
    }

    pub fn not_recognized_domain<T: Into<String>>(msg: T) -> Self {
        BeanlinkError::NotRecognizedDomain(msg.into())
    }

    pub fn url_parse<T: Into<String>>(msg: T) -> Self {
        BeanlinkError::UrlParse(msg.into())
    }

    pub fn shortening_unavailable<T: Into<String>>(msg: T) -> Self {
        BeanlinkError::ShorteningUnavailable(msg.into())
    }

    pub fn copy_generation_unavailable<T: Into<String>>(msg: T) -> Self {
        BeanlinkError::CopyGenerationUnavailable(msg.into())
    }

    pub fn missing_credential<T: Into<String>>(msg: T) -> Self {
        BeanlinkError::MissingCredential(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        BeanlinkError::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, BeanlinkError>;
