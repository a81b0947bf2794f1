use anyhow::Result;
use rpg_content::{ConsumableId, ContentFactory, GearId};
use rpg_sheet::{PartyBuilder, PartySheet, SheetConfig, SheetFormat, default_roster};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SheetConfig::from_env();
    tracing::info!("reading content from {}", config.data_dir.display());

    let content = ContentFactory::new(&config.data_dir).load_all()?;
    let mut party = PartyBuilder::new(&content)
        .level(config.party_level)
        .recruits(default_roster())
        .supply(ConsumableId::Potion, 12)
        .supply(ConsumableId::Ether, 4)
        .supply(ConsumableId::PhoenixDown, 2)
        .supply(ConsumableId::BagExpander, 1)
        .build()?;

    for spare in [GearId::WoodenShield, GearId::GiantBelt] {
        if let Some(gear) = content.gear.get(spare) {
            party.bag.try_add(gear.clone())?;
        }
    }

    let sheet = PartySheet::capture(&party, &content.balance);
    match config.format {
        SheetFormat::Text => print!("{}", sheet.render_text()),
        SheetFormat::Json => println!("{}", sheet.to_json()?),
    }

    Ok(())
}
