pub mod renderer;
pub mod mailer;

pub use renderer::Digest;
pub use mailer::SmtpMailer;
