//! The admin gate, exercised over HTTP. No database is involved: every
//! request here is either rejected by the gate or served from settings.

use jnparts::auth::{issue_token, issue_token_at};
use jnparts::configuration::{
    AdminSettings, ApplicationSettings, DatabaseSettings, JwtSettings, PasswordSettings, Settings,
};
use jnparts::startup::run;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;

const SECRET: &str = "admin-guard-test-secret";

fn jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: SECRET.into(),
        access_token_expiry: 900,
    }
}

fn test_settings() -> Settings {
    Settings {
        database: DatabaseSettings {
            username: "postgres".into(),
            password: "password".into(),
            port: 5432,
            host: "127.0.0.1".into(),
            database_name: "unused".into(),
        },
        application: ApplicationSettings {
            host: "127.0.0.1".into(),
            port: 0,
            environment: "test".into(),
            site_name: "JN Parts & Accessories".into(),
            maintenance_mode: false,
        },
        jwt: jwt_settings(),
        password: PasswordSettings { bcrypt_cost: 4 },
        admin: AdminSettings::default(),
    }
}

fn spawn_app() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let settings = test_settings();
    let pool = PgPoolOptions::new()
        .connect_lazy(&settings.database.connection_string())
        .expect("Failed to create lazy pool");

    let server = run(listener, pool, settings).expect("Failed to create server");
    let _ = tokio::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

async fn get_settings(addr: &str, authorization: Option<String>) -> (u16, Value) {
    let mut request = reqwest::Client::new().get(&format!("{}/admin/api/settings", addr));
    if let Some(value) = authorization {
        request = request.header("Authorization", value);
    }
    let response = request.send().await.expect("Failed to execute request");
    let status = response.status().as_u16();
    (status, response.json().await.expect("Failed to parse response"))
}

#[tokio::test]
async fn admin_token_reaches_the_handler() {
    let addr = spawn_app();
    let token = issue_token(1, "admin", &jwt_settings()).unwrap();

    let (status, body) = get_settings(&addr, Some(format!("Bearer {}", token))).await;

    assert_eq!(200, status);
    assert_eq!(
        body,
        json!({
            "site_name": "JN Parts & Accessories",
            "version": env!("CARGO_PKG_VERSION"),
            "maintenance_mode": false
        })
    );
}

#[tokio::test]
async fn missing_header_is_401() {
    let addr = spawn_app();

    let (status, body) = get_settings(&addr, None).await;

    assert_eq!(401, status);
    assert_eq!(body, json!({"message": "Missing Authorization Header"}));
}

#[tokio::test]
async fn rejected_request_still_carries_request_id() {
    let addr = spawn_app();

    let response = reqwest::Client::new()
        .get(&format!("{}/admin/api/settings", addr))
        .header("Authorization", "Bearer not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(401, response.status().as_u16());
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Rejection should carry a request id");
    assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn non_bearer_scheme_is_401_missing() {
    let addr = spawn_app();

    let (status, body) = get_settings(&addr, Some("Basic YWRtaW46YWRtaW4=".into())).await;

    assert_eq!(401, status);
    assert_eq!(body["message"], "Missing Authorization Header");
}

#[tokio::test]
async fn malformed_token_is_401() {
    let addr = spawn_app();

    let (status, body) = get_settings(&addr, Some("Bearer not.a.token".into())).await;

    assert_eq!(401, status);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid token: "));
}

#[tokio::test]
async fn token_signed_with_another_secret_is_401() {
    let addr = spawn_app();
    let foreign = JwtSettings {
        secret: "someone-elses-secret".into(),
        access_token_expiry: 900,
    };
    let token = issue_token(1, "admin", &foreign).unwrap();

    let (status, body) = get_settings(&addr, Some(format!("Bearer {}", token))).await;

    assert_eq!(401, status);
    assert_eq!(body["message"], "Invalid token: Signature verification failed");
}

#[tokio::test]
async fn expired_token_is_401() {
    let addr = spawn_app();
    let issued = chrono::Utc::now().timestamp() - 3_600;
    let token = issue_token_at(1, "admin", issued, &jwt_settings()).unwrap();

    let (status, body) = get_settings(&addr, Some(format!("Bearer {}", token))).await;

    assert_eq!(401, status);
    assert_eq!(body, json!({"message": "Token has expired"}));
}

#[tokio::test]
async fn non_admin_roles_are_403() {
    let addr = spawn_app();

    for role in ["customer", "superadmin"] {
        let token = issue_token(5, role, &jwt_settings()).unwrap();
        let (status, body) = get_settings(&addr, Some(format!("Bearer {}", token))).await;

        assert_eq!(403, status, "role {}", role);
        assert_eq!(body, json!({"message": "Admins only"}));
    }
}

#[tokio::test]
async fn every_admin_route_is_guarded() {
    let addr = spawn_app();
    let client = reqwest::Client::new();
    let routes = vec![
        ("GET", "/admin/api/products"),
        ("POST", "/admin/api/products"),
        ("PUT", "/admin/api/products/1"),
        ("DELETE", "/admin/api/products/1"),
        ("GET", "/admin/api/testimonials"),
        ("POST", "/admin/api/testimonials"),
        ("PUT", "/admin/api/testimonials/1"),
        ("DELETE", "/admin/api/testimonials/1"),
        ("GET", "/admin/api/portfolio"),
        ("POST", "/admin/api/portfolio"),
        ("PUT", "/admin/api/portfolio/1"),
        ("DELETE", "/admin/api/portfolio/1"),
        ("GET", "/admin/api/contact-requests"),
        ("POST", "/admin/api/contact-requests/1/mark-handled"),
        ("GET", "/admin/api/users"),
        ("POST", "/admin/api/users"),
        ("GET", "/admin/api/overview"),
        ("GET", "/admin/api/settings"),
    ];

    for (method, path) in routes {
        let method = reqwest::Method::from_bytes(method.as_bytes()).unwrap();
        let response = client
            .request(method.clone(), &format!("{}{}", addr, path))
            .json(&json!({}))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(401, response.status().as_u16(), "{} {}", method, path);
    }
}
