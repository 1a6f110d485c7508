// src/app/console.rs
//
// Dialogues en console (rustyline)
// --------------------------------
// - Choix : numéro ou libellé exact
// - Ctrl-C : annule la boîte courante
// - Ctrl-D : entrée fermée (fin de session côté pilote)

use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::i18n::{texte, Cle, Langue};

use super::dialogues::{Dialogues, ErreurDialogue};

pub struct Console {
    editeur: DefaultEditor,
    langue: Langue,
}

impl Console {
    pub fn new(langue: Langue) -> Result<Self, ErreurDialogue> {
        Ok(Self {
            editeur: DefaultEditor::new()?,
            langue,
        })
    }

    /// Une ligne ; `None` si Ctrl-C.
    fn lire(&mut self, invite: &str) -> Result<Option<String>, ErreurDialogue> {
        match self.editeur.readline(invite) {
            Ok(ligne) => {
                if !ligne.trim().is_empty() {
                    self.editeur.add_history_entry(ligne.as_str())?;
                }
                Ok(Some(ligne))
            }
            Err(ReadlineError::Interrupted) => Ok(None),
            Err(ReadlineError::Eof) => Err(ErreurDialogue::Fermee),
            Err(e) => Err(e.into()),
        }
    }

    fn entete(&self, titre: &str, message: &str) -> Result<(), ErreurDialogue> {
        let mut out = io::stdout().lock();
        writeln!(out)?;
        writeln!(out, "── {titre} ──")?;
        if !message.is_empty() {
            writeln!(out, "{}", message.trim_end())?;
        }
        Ok(())
    }
}

impl Dialogues for Console {
    fn choisir(
        &mut self,
        titre: &str,
        message: &str,
        options: &[String],
    ) -> Result<Option<String>, ErreurDialogue> {
        self.entete(titre, message)?;
        {
            let mut out = io::stdout().lock();
            for (i, o) in options.iter().enumerate() {
                writeln!(out, "  {}) {o}", i + 1)?;
            }
        }
        loop {
            let Some(ligne) = self.lire("> ")? else {
                return Ok(None);
            };
            if let Some(i) = interpreter_choix(&ligne, options) {
                return Ok(Some(options[i].clone()));
            }
        }
    }

    fn saisir(&mut self, titre: &str, message: &str) -> Result<Option<String>, ErreurDialogue> {
        self.entete(titre, message)?;
        self.lire("> ")
    }

    fn confirmer(&mut self, titre: &str, message: &str) -> Result<bool, ErreurDialogue> {
        self.entete(titre, "")?;
        let invite = format!(
            "{message} [{}/{}] ",
            texte(Cle::Oui, self.langue),
            texte(Cle::Non, self.langue)
        );
        loop {
            let Some(ligne) = self.lire(&invite)? else {
                return Ok(false);
            };
            if let Some(oui) = interpreter_confirmation(&ligne, self.langue) {
                return Ok(oui);
            }
        }
    }

    fn informer(&mut self, titre: &str, message: &str) -> Result<(), ErreurDialogue> {
        self.entete(titre, message)
    }
}

/// Numéro (à partir de 1) ou libellé exact ; `None` = à redemander.
pub(crate) fn interpreter_choix(ligne: &str, options: &[String]) -> Option<usize> {
    let s = ligne.trim();
    if let Ok(n) = s.parse::<usize>() {
        return (1..=options.len()).contains(&n).then(|| n - 1);
    }
    options.iter().position(|o| o == s)
}

/// Oui/non dans la langue courante, ou en anglais/chiffres partout.
pub(crate) fn interpreter_confirmation(ligne: &str, langue: Langue) -> Option<bool> {
    let s = ligne.trim().to_lowercase();
    if s == texte(Cle::Oui, langue).to_lowercase() {
        return Some(true);
    }
    if s == texte(Cle::Non, langue).to_lowercase() {
        return Some(false);
    }
    match s.as_str() {
        "y" | "yes" | "o" | "1" => Some(true),
        "n" | "no" | "0" => Some(false),
        _ => None,
    }
}
