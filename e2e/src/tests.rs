use reqwest::StatusCode;

use client::client::Client;
use types::domain::AuthRequest;

use crate::domain::TestUser;
use crate::util::{random_email, PASSWORD};

#[tokio::test]
async fn test_register_and_login() -> eyre::Result<()> {
    let mut test_user = TestUser::new().await?;
    assert_eq!(test_user.email, test_user.user.email);

    // login with trailing whitespace and different case
    let email = format!("{} ", test_user.email.to_uppercase());
    let response = test_user
        .client
        .login(AuthRequest::login(email, test_user.password.clone()))
        .await?;

    assert_eq!(test_user.user.id, response.user.id);
    assert!(!response.token.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_register_twice() -> eyre::Result<()> {
    let test_user = TestUser::new().await?;
    let (status, body) = Client::new()
        .auth_raw(&AuthRequest::register(
            test_user.email.to_uppercase(),
            PASSWORD,
            "Someone Else",
        ))
        .await?;
    assert_eq!(StatusCode::CONFLICT, status);
    assert_eq!(r#"{"error":"User with this email already exists"}"#, body);
    Ok(())
}

#[tokio::test]
async fn test_login_failures_look_the_same() -> eyre::Result<()> {
    let test_user = TestUser::new().await?;
    let client = Client::new();

    let wrong_password = client
        .auth_raw(&AuthRequest::login(test_user.email.clone(), "wrong"))
        .await?;
    let unknown_user = client
        .auth_raw(&AuthRequest::login(random_email(), PASSWORD))
        .await?;

    assert_eq!(StatusCode::UNAUTHORIZED, wrong_password.0);
    assert_eq!(r#"{"error":"Invalid email or password"}"#, wrong_password.1);
    assert_eq!(wrong_password, unknown_user);
    Ok(())
}

#[tokio::test]
async fn test_register_without_name() -> eyre::Result<()> {
    let mut request = AuthRequest::register(random_email(), PASSWORD, "");
    request.name = None;
    let (status, body) = Client::new().auth_raw(&request).await?;
    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert_eq!(r#"{"error":"Name is required"}"#, body);
    Ok(())
}

#[tokio::test]
async fn test_preflight() -> eyre::Result<()> {
    let client = Client::new();
    for path in ["/auth", "/merchant-data"] {
        let response = client.preflight(path).await?;
        assert_eq!(StatusCode::OK, response.status());
        assert_eq!("86400", response.headers()["access-control-max-age"]);
        assert!(response.text().await?.is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn test_dashboard() -> eyre::Result<()> {
    let test_user = TestUser::new().await?;
    let data = test_user.client.dashboard().await?;
    assert_eq!(4, data.transactions.len());
    assert_eq!(15, data.chart_data.len());
    assert_eq!(
        data.metrics.total_revenue - data.metrics.total_commission,
        data.metrics.net_income
    );
    Ok(())
}
