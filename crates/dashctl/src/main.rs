#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = dashctl::build_cli().get_matches();
    dashctl::logging::init(matches.get_flag("log-json"))?;

    let output = dashctl::run(&matches).await?;
    println!("{output}");
    Ok(())
}
