//! Runs one of the canned email scenarios against the configured relay.
//!
//! ```text
//! cargo run --example scenarios -- [test|simple|html|attachment|multiple]
//! ```

use std::process;

use log::error;
use relay_mailer::smtp::error::Error;
use relay_mailer::{config, Attachment, Email, Mailer, MailerConfig, SimpleEmail, SmtpRelay};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "scenarios")]
struct Opt {
    /// Scenario to run: test, simple, html, attachment or multiple
    #[structopt(default_value = "test")]
    scenario: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opt = Opt::from_args();

    let config = match MailerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            process::exit(1);
        }
    };
    if !config::check(&config).is_ready() {
        eprintln!("\nPlease configure your .env file first");
        process::exit(1);
    }

    let mailer = match Mailer::from_config(&config) {
        Ok(mailer) => mailer,
        Err(err) => {
            eprintln!("could not create transport: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = run(&mailer, &config, &opt.scenario).await {
        error!("{}", err);
        eprintln!("\nError: {}", err);
        if err.is_authentication() {
            println!("\nAuthentication tips:");
            println!("  1. Enable 2-factor authentication on your Google account");
            println!("  2. Generate an app password at: https://myaccount.google.com/apppasswords");
            println!("  3. Use the 16-character app password in your .env file");
        }
        process::exit(1);
    }
}

async fn run(mailer: &Mailer<SmtpRelay>, config: &MailerConfig, scenario: &str) -> Result<(), Error> {
    let account = config.user.clone().unwrap_or_default();

    match scenario {
        "test" => {
            mailer.send_test().await?;
            println!("\nTest email sent! Check your inbox.");
        }
        "simple" => {
            mailer
                .send_simple(SimpleEmail::new(
                    "John Doe",
                    "john.doe@example.com",
                    "Contact Form Submission",
                    "Hello!\n\nThis is a message from your contact form.\n\nBest regards,\nJohn",
                ))
                .await?;
            println!("\nSimple email sent successfully!");
        }
        "html" => {
            let html = r#"
            <h1 style="color: #333;">Welcome!</h1>
            <p>This is a custom HTML email with <strong>formatting</strong>.</p>
            <ul>
              <li>Feature 1</li>
              <li>Feature 2</li>
              <li>Feature 3</li>
            </ul>
            <p>Visit <a href="https://github.com">GitHub</a> for more info.</p>
            "#;
            let email = Email::new(
                account.as_str(),
                "Custom HTML Email",
                html,
                "Welcome! This is a custom email. Visit GitHub for more info.",
            )
            .reply_to("noreply@example.com");
            mailer.send(email).await?;
            println!("\nHTML email sent successfully!");
        }
        "attachment" => {
            let data = serde_json::json!({
                "example": "data",
                "timestamp": chrono::Local::now().to_rfc3339(),
            });
            let attachments = vec![
                Attachment::new(
                    "example.txt",
                    "This is the content of the text file attachment.",
                    "text/plain",
                ),
                Attachment::new(
                    "data.json",
                    serde_json::to_vec_pretty(&data).unwrap_or_default(),
                    "application/json",
                ),
            ];
            mailer
                .send_simple(
                    SimpleEmail::new(
                        "Jane Smith",
                        "jane.smith@example.com",
                        "Email with Attachments",
                        "Please find the attached files.",
                    )
                    .attachments(attachments),
                )
                .await?;
            println!("\nEmail with attachments sent successfully!");
        }
        "multiple" => {
            // comma-separated addresses are accepted here
            let email = Email::new(
                account.as_str(),
                "Announcement",
                "<h2>Important Announcement</h2><p>This email is sent to multiple recipients.</p>",
                "Important Announcement\n\nThis email is sent to multiple recipients.",
            );
            mailer.send(email).await?;
            println!("\nEmail sent to multiple recipients!");
        }
        _ => {
            println!("Available scenarios:");
            println!("  cargo run --example scenarios test       - Send a test email");
            println!("  cargo run --example scenarios simple     - Send a simple formatted email");
            println!("  cargo run --example scenarios html       - Send custom HTML email");
            println!("  cargo run --example scenarios attachment - Send email with attachments");
            println!("  cargo run --example scenarios multiple   - Send to multiple recipients");
        }
    }
    Ok(())
}
