use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut app = classy_core::App::new()?;
    app.initialize()?;

    tracing::info!("Classy weather started");

    let (config, storage) = app.into_parts();
    classy_ui::tui::run(config, storage).await?;

    tracing::info!("Classy weather exiting");
    Ok(())
}
