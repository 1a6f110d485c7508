//! src/app/etat.rs
//!
//! État de session + état UI (sans vue).
//!
//! Rôle :
//! - `Session` : registre mémoire, historique ordonné, mode de confiance.
//! - `AppCalc` : ce que la fenêtre garde entre deux frames (contrôleur + champ de saisie).
//!
//! Contrats :
//! - Historique : clés uniques ; réévaluer une expression remplace sa valeur SUR PLACE
//!   (la position d’insertion d’origine est conservée).
//! - La mémoire contient toujours une chaîne ("0" au départ).
//! - Rien n’est persisté : tout disparaît avec la session.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::noyau::{evaluer, Issue, ModeConfiance};

use super::controleur::{Controleur, Reponse};

/// Valeur initiale du registre mémoire.
const MEMOIRE_INITIALE: &str = "0";

#[derive(Clone, Debug)]
pub struct Session {
    memoire: String,
    historique: IndexMap<String, String>,
    mode: ModeConfiance,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ModeConfiance::default())
    }
}

impl Session {
    pub fn new(mode: ModeConfiance) -> Self {
        Self {
            memoire: MEMOIRE_INITIALE.to_string(),
            historique: IndexMap::new(),
            mode,
        }
    }

    /* ------------------------ Mémoire ------------------------ */

    pub fn memoire(&self) -> &str {
        &self.memoire
    }

    /// Seule écriture possible du registre (action “mémoriser”).
    pub fn memoriser(&mut self, valeur: impl Into<String>) {
        self.memoire = valeur.into();
        debug!(memoire = %self.memoire, "mémoire mise à jour");
    }

    /* ------------------------ Mode ------------------------ */

    pub fn mode(&self) -> ModeConfiance {
        self.mode
    }

    pub fn basculer_mode(&mut self) -> ModeConfiance {
        self.mode = self.mode.basculer();
        info!(mode = ?self.mode, "mode de confiance changé");
        self.mode
    }

    /// Évalue avec le mode et la mémoire courants (n’enregistre rien).
    pub fn evaluer(&self, expression: &str) -> Issue {
        evaluer(expression, self.mode, &self.memoire)
    }

    /* ------------------------ Historique ------------------------ */

    pub fn enregistrer(&mut self, expression: impl Into<String>, resultat: impl Into<String>) {
        // IndexMap::insert garde la position d’une clé existante
        self.historique.insert(expression.into(), resultat.into());
    }

    pub fn historique(&self) -> impl Iterator<Item = (&str, &str)> {
        self.historique.iter().map(|(e, r)| (e.as_str(), r.as_str()))
    }

    pub fn historique_vide(&self) -> bool {
        self.historique.is_empty()
    }

    pub fn effacer_historique(&mut self) {
        info!(entrees = self.historique.len(), "historique effacé");
        self.historique.clear();
    }

    /// Une ligne `expression=résultat` par entrée, chacune terminée par '\n'.
    pub fn historique_texte(&self) -> String {
        self.historique()
            .map(|(e, r)| format!("{e}={r}\n"))
            .collect()
    }
}

/* ------------------------ État fenêtre ------------------------ */

pub struct AppCalc {
    pub controleur: Controleur,

    // --- entrée utilisateur (écrans de saisie) ---
    pub entree: String,

    // --- UX ---
    // Permet à vue.rs de redonner le focus au champ quand un écran de saisie apparaît.
    pub focus_entree: bool,
}

impl AppCalc {
    pub fn new(controleur: Controleur) -> Self {
        Self {
            controleur,
            entree: String::new(),
            focus_entree: true,
        }
    }

    /// Transmet une réponse au contrôleur ; le champ repart vide sur l’écran suivant.
    pub fn repondre(&mut self, reponse: Reponse) {
        self.controleur.repondre(reponse);
        self.entree.clear();
        self.focus_entree = true;
    }
}
