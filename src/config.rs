// src/config.rs
//
// Configuration de lancement (ligne de commande + variables d’environnement)
// -------------------------------------------------------------------------
// Aucun fichier de configuration : les réglages vivent le temps d’une session.

use clap::Parser;

use crate::i18n::Langue;
use crate::noyau::ModeConfiance;

/// calculatorMax : calculatrice interactive (boîtes de dialogue ou console).
#[derive(Parser, Debug, Clone)]
#[command(name = "calculatorMax", version, long_about = None)]
pub struct Config {
    /// Langue de l’interface
    #[arg(long, value_enum, env = "CALCULATRICE_LANGUE", default_value_t = Langue::Zh)]
    pub langue: Langue,

    /// Démarrer en mode restreint (liste blanche de fonctions)
    #[arg(long)]
    pub restreint: bool,

    /// Console (rustyline) au lieu des boîtes de dialogue
    #[arg(long)]
    pub console: bool,

    /// Filtre de journalisation, syntaxe EnvFilter (ex: "debug", "calculatrice_max=trace")
    #[arg(long, env = "CALCULATRICE_LOG", default_value = "warn")]
    pub journal: String,
}

impl Config {
    /// Mode de confiance initial de la session.
    pub fn mode(&self) -> ModeConfiance {
        if self.restreint {
            ModeConfiance::Restreint
        } else {
            ModeConfiance::Libre
        }
    }
}
