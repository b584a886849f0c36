//! Plays one battle on the embedded dex to the end and prints what happened.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use uniteon_battle::battle::ai::FirstUsableBehavior;
use uniteon_battle::{
    ActionChoice, BattleConfig, BattleKind, BattlePhase, BattleSession, Dex, ForgetChoice,
    Intent, Party, SeededRng, Side, SpeciesId,
};

const MAX_INTENTS: usize = 2_000;

/// Auto-play a Uniteon battle
#[derive(Parser)]
#[command(name = "uniteon-battle")]
#[command(about = "Auto-play a Uniteon battle and print its events", long_about = None)]
#[command(version)]
struct Cli {
    /// Seed for the encounter roll and the battle; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Fight a mentor's party instead of a wild Uniteon
    #[arg(long)]
    mentor: bool,

    /// Area to roll the wild Uniteon from
    #[arg(long, default_value = "Route 1")]
    area: String,

    /// Level of the gamer's party
    #[arg(long, default_value_t = 8)]
    level: u8,

    /// Battle rules in RON; defaults apply to anything it leaves out
    #[arg(long)]
    config: Option<PathBuf>,

    /// The foe always uses its first move with PP
    #[arg(long)]
    predictable_foe: bool,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dex = Dex::embedded().context("loading the embedded dex")?;

    let mut config = match &cli.config {
        Some(path) => BattleConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => BattleConfig::default(),
    };
    let seed = cli.seed.or(config.seed).unwrap_or_else(|| SeededRng::from_entropy().seed());
    config.seed = Some(seed);
    tracing::info!(seed, mentor = cli.mentor, "starting demo battle");

    let mut gamer = Party::new(vec![
        dex.create_unit(SpeciesId(1), cli.level)?,
        dex.create_unit(SpeciesId(3), cli.level)?,
    ]);
    let (mut foe, kind) = if cli.mentor {
        let party = Party::new(vec![
            dex.create_unit(SpeciesId(5), cli.level)?,
            dex.create_unit(SpeciesId(7), cli.level)?,
            dex.create_unit(SpeciesId(8), cli.level)?,
        ]);
        (party, BattleKind::Mentor)
    } else {
        let Some(area) = dex.area(&cli.area) else {
            bail!(
                "unknown area {:?}; known areas: {}",
                cli.area,
                dex.area_names().join(", ")
            );
        };
        let mut encounter_rng = SeededRng::new(seed);
        let party = area.roll_wild(dex, &mut encounter_rng)?;
        (party, BattleKind::Wild { capturable: true })
    };

    let mut session = BattleSession::new(&mut gamer, &mut foe, kind, config)?;
    if cli.predictable_foe {
        session = session.with_behavior(Box::new(FirstUsableBehavior));
    }

    for _ in 0..MAX_INTENTS {
        let Some(intent) = next_intent(&session) else {
            break;
        };
        for event in session.handle(intent)? {
            if cli.json {
                println!("{}", serde_json::to_string(&event)?);
            } else if let Some(line) = session.describe(&event) {
                println!("{}", line);
            }
        }
    }

    if !session.current_phase().is_over() {
        bail!(
            "battle did not finish within {} intents (stuck in {:?})",
            MAX_INTENTS,
            session.current_phase()
        );
    }
    Ok(())
}

/// Always fight with the first usable move, fill fainted slots in party
/// order, and keep the old moves when a new one comes up.
fn next_intent(session: &BattleSession<'_>) -> Option<Intent> {
    match session.current_phase() {
        BattlePhase::Start => Some(Intent::Confirm),
        BattlePhase::ActionSelection => Some(Intent::SelectAction(ActionChoice::Fight)),
        BattlePhase::MoveSelection => session
            .legal_move_indices(Side::Gamer)
            .first()
            .map(|&index| Intent::ConfirmMove(index)),
        BattlePhase::PartyScreenFromFaint | BattlePhase::PartyScreenFromSelection => session
            .party_roster_view(Side::Gamer)
            .members
            .iter()
            .find(|member| !member.fainted && !member.active)
            .map(|member| Intent::SelectPartyMember(member.slot)),
        BattlePhase::MoveToForget => Some(Intent::SelectForgetSlot(ForgetChoice::Decline)),
        _ => None,
    }
}
