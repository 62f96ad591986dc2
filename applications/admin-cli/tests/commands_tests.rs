//! End-to-end command tests: real HTTP client against a mock door
//! controller, terminal view reading scripted input.

use modulock_admin::{messages, AdminController};
use modulock_admin_cli::commands::{self, RegisterArgs, TerminalController};
use modulock_admin_cli::terminal::{Panels, TerminalView};
use modulock_client::{ClientConfig, ModuLockClient};
use std::io::{self, BufRead, BufReader, Cursor, Read, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Output sink the test can read back while the view still owns a handle.
#[derive(Clone, Default)]
struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

type TestController = TerminalController<ModuLockClient, Cursor<Vec<u8>>, SharedOutput>;

const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Input that stalls like an idle terminal, then reports end of input.
struct StalledInput(Duration);

impl Read for StalledInput {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        std::thread::sleep(self.0);
        Ok(0)
    }
}

fn setup(
    server: &MockServer,
    input: &str,
    panels: Panels,
    assume_yes: bool,
) -> (TestController, SharedOutput) {
    setup_with_input(&server.uri(), Cursor::new(input.as_bytes().to_vec()), panels, assume_yes)
}

fn setup_with_input<R: BufRead + Send + 'static>(
    url: &str,
    input: R,
    panels: Panels,
    assume_yes: bool,
) -> (
    TerminalController<ModuLockClient, R, SharedOutput>,
    SharedOutput,
) {
    let client = ModuLockClient::new(ClientConfig::with_session(url, "admin_session"))
        .unwrap();
    let output = SharedOutput::default();
    let view = TerminalView::new(input, output.clone(), panels).assume_yes(assume_yes);
    let controller = AdminController::with_poll_interval(
        Arc::new(client),
        Arc::new(view),
        Duration::from_millis(20),
    );
    (controller, output)
}

async fn mount_scan(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/getLastScannedUid"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_users(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/getUsers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

// =============================================================================
// Door
// =============================================================================

mod door {
    use super::*;

    #[tokio::test]
    async fn test_open_door_prints_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openDoor"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Porta aberta com sucesso!"))
            .expect(1)
            .mount(&server)
            .await;

        let (controller, output) = setup(&server, "", Panels::default(), false);

        commands::open_door(&controller).await.unwrap();

        assert!(output.text().contains("Porta aberta com sucesso!"));
    }

    #[tokio::test]
    async fn test_open_door_unauthorized_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openDoor"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Não autorizado. Faça login."))
            .mount(&server)
            .await;

        let (controller, output) = setup(&server, "", Panels::default(), false);

        let err = commands::open_door(&controller).await.unwrap_err();

        assert!(err.to_string().contains("401"));
        assert!(output.text().contains("Não autorizado. Faça login."));
    }
}

// =============================================================================
// Users
// =============================================================================

mod users {
    use super::*;

    #[tokio::test]
    async fn test_users_prints_table() {
        let server = MockServer::start().await;
        mount_users(
            &server,
            r#"{"users":[{"ra":"2021001","name":"Ana","uid":"A1B2C3D4"}]}"#,
        )
        .await;

        let (controller, output) = setup(&server, "", Panels::dashboard(), false);

        commands::list_users(&controller).await.unwrap();

        let text = output.text();
        assert!(text.contains("RA       Name  UID       Action"));
        assert!(text.contains("2021001  Ana   A1B2C3D4  Remove"));
    }

    #[tokio::test]
    async fn test_users_load_failure_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/getUsers"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (controller, output) = setup(&server, "", Panels::dashboard(), false);

        assert!(commands::list_users(&controller).await.is_err());
        assert!(output.text().contains(messages::USERS_FAILED));
    }

    #[tokio::test]
    async fn test_dashboard_shows_empty_notice() {
        let server = MockServer::start().await;
        mount_users(&server, r#"{"users":[]}"#).await;

        let (controller, output) = setup(&server, "", Panels::dashboard(), false);

        commands::dashboard(&controller).await.unwrap();

        assert!(output.text().contains(messages::NO_USERS));
        assert!(!controller.is_polling());
    }
}

// =============================================================================
// Removal
// =============================================================================

mod removal {
    use super::*;

    #[tokio::test]
    async fn test_remove_confirmed_from_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/removeUser"))
            .and(body_string("ra=2021001"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Usuário removido"))
            .expect(1)
            .mount(&server)
            .await;
        mount_users(&server, r#"{"users":[]}"#).await;

        let (controller, output) = setup(&server, "y\n", Panels::dashboard(), false);

        commands::remove_user(&controller, "2021001").await.unwrap();

        let text = output.text();
        assert!(text.contains("Are you sure you want to remove user 2021001? [y/N]: "));
        assert!(text.contains("Usuário removido"));
        assert!(text.contains(messages::NO_USERS));
    }

    #[tokio::test]
    async fn test_remove_declined_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/removeUser"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (controller, _output) = setup(&server, "n\n", Panels::dashboard(), false);

        commands::remove_user(&controller, "2021001").await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_with_yes_skips_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/removeUser"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Usuário não encontrado"))
            .expect(1)
            .mount(&server)
            .await;
        mount_users(&server, r#"{"users":[]}"#).await;

        let (controller, output) = setup(&server, "", Panels::dashboard(), true);

        assert!(commands::remove_user(&controller, "9999").await.is_err());
        let text = output.text();
        assert!(!text.contains("[y/N]"));
        assert!(text.contains("Usuário não encontrado"));
    }
}

// =============================================================================
// Registration
// =============================================================================

mod registration {
    use super::*;

    #[tokio::test]
    async fn test_register_with_all_fields() {
        let server = MockServer::start().await;
        mount_scan(&server, "No UID").await;
        Mock::given(method("POST"))
            .and(path("/registerUser"))
            .and(body_string("ra=2021003&name=Ana+Maria&uid=A1B2C3D4"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("Usuário cadastrado com sucesso!"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (controller, output) = setup(&server, "", Panels::registration(), false);
        let args = RegisterArgs {
            ra: Some("2021003".to_string()),
            name: Some("Ana Maria".to_string()),
            uid: Some("A1B2C3D4".to_string()),
            continuous: false,
        };

        tokio::time::timeout(
            TEST_TIMEOUT,
            commands::register(&controller, args, &CancellationToken::new()),
        )
        .await
        .unwrap()
        .unwrap();

        assert!(output.text().contains("Usuário cadastrado com sucesso!"));
        assert!(!controller.is_polling());
    }

    #[tokio::test]
    async fn test_register_waits_for_scan() {
        let server = MockServer::start().await;
        mount_scan(&server, "0F1E2D3C").await;
        Mock::given(method("POST"))
            .and(path("/registerUser"))
            .and(body_string("ra=2021004&name=Bruno&uid=0F1E2D3C"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Usuário cadastrado"))
            .expect(1)
            .mount(&server)
            .await;

        let (controller, output) = setup(&server, "", Panels::registration(), false);
        let args = RegisterArgs {
            ra: Some("2021004".to_string()),
            name: Some("Bruno".to_string()),
            ..RegisterArgs::default()
        };

        tokio::time::timeout(
            TEST_TIMEOUT,
            commands::register(&controller, args, &CancellationToken::new()),
        )
        .await
        .unwrap()
        .unwrap();

        let text = output.text();
        assert!(text.contains(messages::AWAITING_SCAN));
        assert!(text.contains("UID Scanned: 0F1E2D3C"));
    }

    #[tokio::test]
    async fn test_register_rejected_fails() {
        let server = MockServer::start().await;
        mount_scan(&server, "No UID").await;
        Mock::given(method("POST"))
            .and(path("/registerUser"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Erro: RA já cadastrado"))
            .mount(&server)
            .await;

        let (controller, output) = setup(&server, "", Panels::registration(), false);
        let args = RegisterArgs {
            ra: Some("2021001".to_string()),
            name: Some("Ana".to_string()),
            uid: Some("A1B2C3D4".to_string()),
            continuous: false,
        };

        let result = tokio::time::timeout(
            TEST_TIMEOUT,
            commands::register(&controller, args, &CancellationToken::new()),
        )
        .await
        .unwrap();

        let err = result.unwrap_err().to_string();
        assert_eq!(err, "door controller refused the registration");
        assert!(!err.contains("Rejected"));
        assert!(output.text().contains("Erro: RA já cadastrado"));
        assert!(!controller.is_polling());
    }

    #[tokio::test]
    async fn test_continuous_prompts_until_end_of_input() {
        let server = MockServer::start().await;
        mount_scan(&server, "A1B2C3D4").await;
        Mock::given(method("POST"))
            .and(path("/registerUser"))
            .and(body_string("ra=2021003&name=Ana&uid=A1B2C3D4"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Usuário cadastrado"))
            .expect(1)
            .mount(&server)
            .await;

        let (controller, output) = setup(&server, "2021003\nAna\n", Panels::registration(), false);
        let args = RegisterArgs {
            continuous: true,
            ..RegisterArgs::default()
        };

        tokio::time::timeout(
            TEST_TIMEOUT,
            commands::register(&controller, args, &CancellationToken::new()),
        )
        .await
        .unwrap()
        .unwrap();

        let text = output.text();
        assert!(text.contains("RA: "));
        assert!(text.contains("Name: "));
        assert!(!controller.is_polling());
    }

    #[tokio::test]
    async fn test_unreachable_registration_reports_reason() {
        // Nothing listens on port 1
        let (controller, output) = setup_with_input(
            "http://127.0.0.1:1",
            Cursor::new(Vec::new()),
            Panels::registration(),
            false,
        );
        let args = RegisterArgs {
            ra: Some("2021001".to_string()),
            name: Some("Ana".to_string()),
            uid: Some("A1B2C3D4".to_string()),
            continuous: false,
        };

        let err = tokio::time::timeout(
            TEST_TIMEOUT,
            commands::register(&controller, args, &CancellationToken::new()),
        )
        .await
        .unwrap()
        .unwrap_err();

        assert_eq!(err.to_string(), "door controller unreachable");
        assert!(output.text().contains(messages::REGISTRATION_FAILED));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_waiting_prompt() {
        let server = MockServer::start().await;
        mount_scan(&server, "No UID").await;
        Mock::given(method("POST"))
            .and(path("/registerUser"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let input = BufReader::new(StalledInput(Duration::from_secs(2)));
        let (controller, output) =
            setup_with_input(&server.uri(), input, Panels::registration(), false);
        let args = RegisterArgs {
            uid: Some("A1B2C3D4".to_string()),
            ..RegisterArgs::default()
        };
        let cancel = CancellationToken::new();

        let cancel_later = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            cancel_later.cancel();
        });

        let started = std::time::Instant::now();
        tokio::time::timeout(TEST_TIMEOUT, commands::register(&controller, args, &cancel))
            .await
            .unwrap()
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(output.text().contains("RA: "));
        assert!(!controller.is_polling());
    }

    #[tokio::test]
    async fn test_cancelled_registration_sends_nothing() {
        let server = MockServer::start().await;
        mount_scan(&server, "No UID").await;
        Mock::given(method("POST"))
            .and(path("/registerUser"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (controller, _output) = setup(&server, "", Panels::registration(), false);
        let cancel = CancellationToken::new();
        cancel.cancel();

        tokio::time::timeout(
            TEST_TIMEOUT,
            commands::register(&controller, RegisterArgs::default(), &cancel),
        )
        .await
        .unwrap()
        .unwrap();

        assert!(!controller.is_polling());
    }
}

// =============================================================================
// Watch
// =============================================================================

mod watch {
    use super::*;

    #[tokio::test]
    async fn test_watch_reports_scan() {
        let server = MockServer::start().await;
        mount_scan(&server, "0F1E2D3C").await;

        let (controller, output) = setup(&server, "", Panels::registration(), false);

        tokio::time::timeout(
            TEST_TIMEOUT,
            commands::watch(&controller, &CancellationToken::new()),
        )
        .await
        .unwrap()
        .unwrap();

        assert!(output.text().contains("UID Scanned: 0F1E2D3C"));
        assert!(!controller.is_polling());
    }

    #[tokio::test]
    async fn test_watch_cancelled_stops_polling() {
        let server = MockServer::start().await;
        mount_scan(&server, "No UID").await;

        let (controller, _output) = setup(&server, "", Panels::registration(), false);
        let cancel = CancellationToken::new();

        let cancel_later = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(150)).await;
            cancel_later.cancel();
        });

        let result = tokio::time::timeout(TEST_TIMEOUT, commands::watch(&controller, &cancel))
            .await
            .unwrap();

        assert!(result.is_err());
        assert!(!controller.is_polling());
    }
}
