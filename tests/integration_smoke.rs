#![cfg(feature = "integration")]

use std::time::{SystemTime, UNIX_EPOCH};

use openai_usage::{AdminClient, CostParams, CostsPage, Env, Result};

#[tokio::test]
async fn organization_costs_smoke() -> Result<()> {
    let env = Env::default();
    if env.get("OPENAI_ADMIN_KEY").is_none() {
        return Ok(());
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default();
    let client = AdminClient::from_env(&env).await?;
    let body = client
        .costs(CostParams {
            limit: Some(1),
            ..CostParams::new(now - 7 * 86_400)
        })
        .await?;

    assert!(body.is_object());
    CostsPage::from_value(&body)?;
    Ok(())
}
