#[cfg(feature = "file-transport")]
mod test {
    use relay_mailer::file::SerializableEmail;
    use relay_mailer::{async_test, mime, Attachment, Email, FileRelay, Mailer, MailerConfig, SimpleEmail};

    fn relay(dir: &std::path::Path) -> FileRelay {
        FileRelay::new(dir, mime::default_sender("Email Service", "relay@gmail.com").unwrap())
    }

    async_test! { file_relay_writes_message_and_envelope, {
        let dir = tempfile::tempdir().unwrap();
        let relay = relay(dir.path());
        let config = MailerConfig::new("relay@gmail.com", "app-password")
            .default_recipient("inbox@example.com");
        let mailer = Mailer::new(relay, &config);

        let fields = SimpleEmail::new(
            "Jane Smith",
            "jane.smith@example.com",
            "Email with Attachments",
            "Please find the attached files.",
        )
        .attachments(vec![
            Attachment::new("example.txt", "attachment body", "text/plain"),
            Attachment::new("data.json", "{}", "application/json"),
        ]);
        let result = mailer.send_simple(fields).await.unwrap();

        let raw = std::fs::read_to_string(mailer.relay().message_path(&result.message_id)).unwrap();
        assert!(raw.contains("Subject: Email with Attachments"));
        assert!(raw.contains("Reply-To: jane.smith@example.com"));
        assert!(raw.contains("filename=\"example.txt\""));
        assert!(raw.contains("filename=\"data.json\""));

        let record = std::fs::read_to_string(mailer.relay().envelope_path(&result.message_id)).unwrap();
        let record: SerializableEmail = serde_json::from_str(&record).unwrap();
        assert_eq!(record.message_id, result.message_id);
        assert_eq!(record.envelope.forward_path(), &["inbox@example.com".to_string()]);
        assert_eq!(record.envelope.reverse_path(), Some("relay@gmail.com"));
    }}

    async_test! { file_relay_rejects_empty_recipient, {
        let dir = tempfile::tempdir().unwrap();
        let relay = relay(dir.path());
        let mailer = Mailer::new(relay, &MailerConfig::default());

        let err = mailer
            .send(Email::new("", "Hello", "<p>Hi</p>", "Hi"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            relay_mailer::file::error::Error::Message(relay_mailer::error::Error::MissingTo)
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }}
}
