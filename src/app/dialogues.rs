// src/app/dialogues.rs
//
// Interface de dialogue (boîtes modales) + pilote bloquant
// --------------------------------------------------------
// Toute présentation capable de poser ces quatre questions peut conduire une session.
// `None` / `false` = l’utilisateur a annulé ; `Err` = le collaborateur a disparu.

use rustyline::error::ReadlineError;
use thiserror::Error;
use tracing::debug;

use super::controleur::{Controleur, Ecran, Reponse};

#[derive(Debug, Error)]
pub enum ErreurDialogue {
    /// Entrée fermée (fin de fichier, canal coupé).
    #[error("dialogue fermé")]
    Fermee,
    #[error("entrée/sortie: {0}")]
    Io(#[from] std::io::Error),
    #[error("console: {0}")]
    Ligne(#[from] ReadlineError),
}

pub trait Dialogues {
    /// Boîte à boutons : renvoie le libellé choisi.
    fn choisir(
        &mut self,
        titre: &str,
        message: &str,
        options: &[String],
    ) -> Result<Option<String>, ErreurDialogue>;

    /// Saisie d’une ligne de texte.
    fn saisir(&mut self, titre: &str, message: &str) -> Result<Option<String>, ErreurDialogue>;

    /// Oui / non.
    fn confirmer(&mut self, titre: &str, message: &str) -> Result<bool, ErreurDialogue>;

    fn informer(&mut self, titre: &str, message: &str) -> Result<(), ErreurDialogue>;
}

/// Fait tourner la machine à états jusqu’à `Termine`.
pub fn piloter(
    controleur: &mut Controleur,
    dialogues: &mut impl Dialogues,
) -> Result<(), ErreurDialogue> {
    loop {
        let reponse = match controleur.ecran() {
            Ecran::Fin => return Ok(()),
            Ecran::Choix {
                titre,
                message,
                options,
            } => dialogues
                .choisir(&titre, &message, &options)?
                .map_or(Reponse::Annule, Reponse::Choix),
            Ecran::Saisie { titre, message } => dialogues
                .saisir(&titre, &message)?
                .map_or(Reponse::Annule, Reponse::Texte),
            Ecran::Confirmation { titre, message } => {
                Reponse::Confirme(dialogues.confirmer(&titre, &message)?)
            }
            Ecran::Information { titre, message } => {
                dialogues.informer(&titre, &message)?;
                Reponse::Vu
            }
        };
        debug!(?reponse, "réponse reçue");
        controleur.repondre(reponse);
    }
}
