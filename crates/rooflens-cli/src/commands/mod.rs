//! Command implementations

use anyhow::{Context, Result};

use rooflens_core::{AIBackend, AIClient, CacheClient, InsightPipeline};
use rooflens_server::ServerConfig;

/// Wire a pipeline from the environment
///
/// AI backend is required; without a configured KV store the in-process
/// cache is used, which only persists for the lifetime of the process.
fn build_pipeline() -> Result<InsightPipeline> {
    let ai = AIClient::from_env()
        .context("AI backend not configured (set GROQ_API_KEY, or AI_BACKEND=mock)")?;

    let cache = CacheClient::from_env().unwrap_or_else(|| {
        tracing::info!("KV store not configured, using in-process cache");
        CacheClient::memory()
    });

    Ok(InsightPipeline::new(ai, cache))
}

pub async fn cmd_insight(address: &str, json: bool) -> Result<()> {
    let pipeline = build_pipeline()?;
    let insight = pipeline.get_or_generate(address).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&insight)?);
        return Ok(());
    }

    println!();
    println!("🏠 {}", insight.address);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Roof condition:   {}", insight.roof_condition);
    println!("   Estimated age:    {}", insight.estimated_age);
    println!("   Replacement cost: {}", insight.replacement_cost);
    println!("   Storm risk:       {}", insight.storm_risk);
    println!("   Value impact:     {}", insight.property_value_impact);
    println!();
    println!("   🔧 Maintenance recommendations:");
    for rec in &insight.maintenance_recommendations {
        println!("      - {}", rec);
    }
    println!();
    println!("   🌱 Sustainability options:");
    for opt in &insight.sustainability_options {
        println!("      - {}", opt);
    }
    println!();
    println!("   Confidence: {:.0}%", insight.confidence * 100.0);
    println!();

    Ok(())
}

pub async fn cmd_serve(host: &str, port: u16) -> Result<()> {
    let pipeline = build_pipeline()?;
    rooflens_server::serve(pipeline, host, port, ServerConfig::default()).await
}

pub async fn cmd_status() -> Result<()> {
    println!();
    println!("📊 Rooflens Status");
    println!("   ─────────────────────────────────────────────────────────────");

    match AIClient::from_env() {
        Some(ai) => {
            println!("   AI backend: {} (model: {})", ai.host(), ai.model());
            if ai.health_check().await {
                println!("   ✅ AI backend responding");
            } else {
                println!("   ⚠️  AI backend configured but not responding");
            }
        }
        None => {
            println!("   ❌ AI backend not configured");
            println!("      Set GROQ_API_KEY, or AI_BACKEND=mock for development");
        }
    }

    match CacheClient::from_env() {
        Some(cache) => println!("   Cache store: {}", cache.kind()),
        None => {
            println!("   Cache store: in-process (set KV_REST_API_URL and");
            println!("                KV_REST_API_TOKEN for a shared KV store)");
        }
    }

    println!();
    Ok(())
}
