use anyhow::{Context, Result};
use serde_json::json;
use std::time::Instant;
use supalink::{Service, SupabaseClient};
use tracing::info;

pub fn info(client: &SupabaseClient, as_json: bool) -> Result<()> {
    let config = client.config();
    if as_json {
        let endpoints: serde_json::Map<String, serde_json::Value> = Service::ALL
            .iter()
            .map(|s| (s.to_string(), json!(client.endpoint(*s).as_str())))
            .collect();
        let out = json!({
            "url": client.url().as_str(),
            "anon_key": config.redacted_key(),
            "schema": config.schema,
            "timeout_secs": config.timeout_secs,
            "endpoints": endpoints,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("url        {}", client.url());
    println!("anon key   {}", config.redacted_key());
    println!("schema     {}", config.schema.as_deref().unwrap_or("public"));
    for service in Service::ALL {
        println!("{:<10} {}", service.to_string(), client.endpoint(service));
    }
    Ok(())
}

pub async fn ping(client: &SupabaseClient, as_json: bool) -> Result<()> {
    let started = Instant::now();
    let health = client
        .health()
        .await
        .with_context(|| format!("pinging {}", client.endpoint(Service::Auth)))?;
    let latency_ms = started.elapsed().as_millis();
    info!(latency_ms = latency_ms as u64, "backend reachable");

    if as_json {
        let out = json!({ "ok": true, "latency_ms": latency_ms as u64, "health": health });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "ok {} {} ({} ms)",
        health.name.as_deref().unwrap_or("auth"),
        health.version.as_deref().unwrap_or("unknown"),
        latency_ms
    );
    Ok(())
}
