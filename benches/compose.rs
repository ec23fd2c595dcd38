use chrono::Local;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relay_mailer::{mime, template, Attachment, Mailer, MailerConfig, SimpleEmail, StubRelay};

fn fields() -> SimpleEmail {
    SimpleEmail::new(
        "John Doe",
        "john.doe@example.com",
        "Contact Form Submission",
        "Hello!\n\nThis is a message from your contact form.\n\nBest regards,\nJohn",
    )
    .attachments(vec![
        Attachment::new("example.txt", vec![b'x'; 4096], "text/plain"),
        Attachment::new("data.json", "{\"example\":\"data\"}", "application/json"),
    ])
}

fn bench_render(c: &mut Criterion) {
    let fields = fields();
    let now = Local::now();
    c.bench_function("render template", move |b| {
        b.iter(|| black_box(template::render(&fields, "Sent via Gmail SMTP Service", &now)))
    });
}

fn bench_build_mime(c: &mut Criterion) {
    let config = MailerConfig::new("relay@gmail.com", "app-password");
    let mailer = Mailer::new(StubRelay::new_positive(), &config);
    let email = mailer.compose(fields(), &Local::now());
    let sender = mime::default_sender("Email Service", "relay@gmail.com").unwrap();

    c.bench_function("build mime message", move |b| {
        b.iter(|| {
            let (message, _) = mime::build(&email, &sender).unwrap();
            black_box(message.formatted())
        })
    });
}

criterion_group!(benches, bench_render, bench_build_mime);
criterion_main!(benches);
