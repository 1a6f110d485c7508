// src/main.rs
//
// calculatorMax — point d’entrée
// ------------------------------
// But:
// - Configuration      : clap (ligne de commande + variables d’environnement)
// - Journal            : tracing + EnvFilter, sur stderr (stdout reste à la console)
// - Boîtes de dialogue : eframe::run_native (par défaut)
// - Console            : rustyline (--console), même machine à états
// - Polices            : police CJK du système chargée à l’exécution (anti “carrés”)

use eframe::egui;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod i18n;
mod noyau;

use app::console::Console;
use app::controleur::Controleur;
use app::dialogues::{piloter, ErreurDialogue};
use app::etat::Session;
use app::export::ExportFichier;
use app::AppCalc;
use clap::Parser;
use config::Config;
use i18n::NOM_APP;

#[derive(Debug, Error)]
enum ErreurApp {
    #[error("dialogue interrompu: {0}")]
    Dialogue(#[from] ErreurDialogue),
    #[error("interface graphique: {0}")]
    Interface(#[from] eframe::Error),
}

/* ------------------------ Journal ------------------------ */

fn initialiser_journal(filtre: &str) {
    let (filtre, invalide) = match EnvFilter::try_new(filtre) {
        Ok(f) => (f, None),
        Err(e) => (EnvFilter::new("warn"), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();

    if let Some(e) = invalide {
        warn!(erreur = %e, "filtre de journal invalide, repli sur \"warn\"");
    }
}

/* ------------------------ Polices ------------------------ */

/// Emplacements usuels d’une police CJK (Linux, Windows, macOS).
const POLICES_CJK: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
];

fn installer_polices(ctx: &egui::Context) {
    use egui::{FontData, FontDefinitions, FontFamily};

    let trouvee = POLICES_CJK
        .iter()
        .find_map(|chemin| std::fs::read(chemin).ok().map(|octets| (*chemin, octets)));
    let Some((chemin, octets)) = trouvee else {
        warn!("aucune police CJK trouvée : les libellés chinois risquent de s’afficher en carrés");
        return;
    };

    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".to_string(), FontData::from_owned(octets).into());

    // En repli : les polices latines par défaut restent prioritaires
    for famille in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(famille)
            .or_default()
            .push("cjk".to_string());
    }

    ctx.set_fonts(fonts);
    info!(police = chemin, "police CJK chargée");
}

/* ------------------------ Lancements ------------------------ */

fn lancer_console(mut controleur: Controleur) -> Result<(), ErreurApp> {
    let mut console = Console::new(controleur.langue())?;
    match piloter(&mut controleur, &mut console) {
        // Ctrl-D : fin de session normale en console
        Ok(()) | Err(ErreurDialogue::Fermee) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn lancer_fenetre(controleur: Controleur) -> Result<(), ErreurApp> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(NOM_APP)
            .with_inner_size([560.0, 420.0])
            .with_min_inner_size([380.0, 280.0]),
        ..Default::default()
    };

    eframe::run_native(
        NOM_APP,
        options,
        Box::new(|cc| {
            // Contexte egui prêt => polices avant la première frame.
            installer_polices(&cc.egui_ctx);
            Ok(Box::new(AppCalc::new(controleur)))
        }),
    )?;
    Ok(())
}

fn main() -> Result<(), ErreurApp> {
    let config = Config::parse();
    initialiser_journal(&config.journal);
    info!(langue = ?config.langue, mode = ?config.mode(), console = config.console, "démarrage");

    let controleur = Controleur::new(
        Session::new(config.mode()),
        config.langue,
        Box::new(ExportFichier),
    );

    if config.console {
        lancer_console(controleur)
    } else {
        lancer_fenetre(controleur)
    }
}
