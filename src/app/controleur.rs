// src/app/controleur.rs
//
// Contrôleur de session (machine à états explicite)
// ------------------------------------------------
// - `ecran()`      : ce qu’il faut montrer maintenant (boîte à boutons, saisie, confirmation…)
// - `repondre(r)`  : consomme la réponse de l’utilisateur et passe à l’état suivant
//
// Le contrôleur ne dessine rien : la fenêtre egui l’appelle à chaque frame,
// le pilote console (dialogues::piloter) l’appelle en boucle bloquante.
//
// Annulation = choix le moins destructeur :
// - saisie d’expression -> accueil, rien d’enregistré
// - saisie de chemin    -> historique, rien d’écrit
// - confirmation        -> “non”
// - message             -> fermé (état suivant)

use std::mem;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::i18n::{libelle_erreur, texte, titre, Cle, Langue, NOM_APP};
use crate::noyau::registre::{signature, Fonction};
use crate::noyau::{Issue, ModeConfiance};

use super::etat::Session;
use super::export::{ErreurExport, Exportateur};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Etat {
    MenuPrincipal,
    Calcul,
    Resultat { expression: String, issue: Issue },
    Historique,
    SaisieChemin,
    Parametres,
    ConfirmationEffacement,
    ReglageMode,
    ConfirmationSortie { retour: Box<Etat> },
    Message { titre: String, texte: String, suite: Box<Etat> },
    Termine,
}

/// Ce que l’interface doit présenter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ecran {
    Choix {
        titre: String,
        message: String,
        options: Vec<String>,
    },
    Saisie {
        titre: String,
        message: String,
    },
    Confirmation {
        titre: String,
        message: String,
    },
    Information {
        titre: String,
        message: String,
    },
    Fin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reponse {
    /// Libellé d’un bouton de l’écran courant.
    Choix(String),
    /// Texte validé dans un écran de saisie.
    Texte(String),
    Confirme(bool),
    /// Message lu.
    Vu,
    /// Échap, Ctrl-C, fermeture d’une boîte.
    Annule,
}

/// Boutons des écrans à choix (le libellé dépend de la langue, pas l’action).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Commencer,
    ModeEmploi,
    Historique,
    Parametres,
    Quitter,
    Continuer,
    Accueil,
    Memoriser,
    Retour,
    Exporter,
    EffacerHistorique,
    ReglageMode,
    BasculerMode,
}

pub struct Controleur {
    session: Session,
    etat: Etat,
    langue: Langue,
    exportateur: Box<dyn Exportateur>,
}

impl Controleur {
    pub fn new(session: Session, langue: Langue, exportateur: Box<dyn Exportateur>) -> Self {
        Self {
            session,
            etat: Etat::MenuPrincipal,
            langue,
            exportateur,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn etat(&self) -> &Etat {
        &self.etat
    }

    pub fn langue(&self) -> Langue {
        self.langue
    }

    pub fn est_termine(&self) -> bool {
        self.etat == Etat::Termine
    }

    fn t(&self, cle: Cle) -> &'static str {
        texte(cle, self.langue)
    }

    /* ------------------------ Écran courant ------------------------ */

    pub fn ecran(&self) -> Ecran {
        match &self.etat {
            Etat::MenuPrincipal | Etat::Historique | Etat::Parametres | Etat::ReglageMode => {
                self.ecran_choix(&self.etat)
            }
            Etat::Resultat { .. } => self.ecran_choix(&self.etat),
            Etat::Calcul => Ecran::Saisie {
                titre: NOM_APP.to_string(),
                message: self.t(Cle::SaisirExpression).to_string(),
            },
            Etat::SaisieChemin => Ecran::Saisie {
                titre: NOM_APP.to_string(),
                message: self.t(Cle::SaisirChemin).to_string(),
            },
            Etat::ConfirmationEffacement => Ecran::Confirmation {
                titre: NOM_APP.to_string(),
                message: self.t(Cle::ConfirmerEffacement).to_string(),
            },
            Etat::ConfirmationSortie { .. } => Ecran::Confirmation {
                titre: NOM_APP.to_string(),
                message: self.t(Cle::ConfirmerSortie).to_string(),
            },
            Etat::Message { titre, texte, .. } => Ecran::Information {
                titre: titre.clone(),
                message: texte.clone(),
            },
            Etat::Termine => Ecran::Fin,
        }
    }

    fn ecran_choix(&self, etat: &Etat) -> Ecran {
        let (titre, message) = match etat {
            Etat::MenuPrincipal => (NOM_APP.to_string(), self.t(Cle::Slogan).to_string()),
            Etat::Resultat { expression, issue } => (
                titre(Cle::Resultat, self.langue),
                format!("{expression}={}", self.affichage(issue)),
            ),
            Etat::Historique => {
                let message = if self.session.historique_vide() {
                    self.t(Cle::HistoriqueVide).to_string()
                } else {
                    self.session.historique_texte()
                };
                (titre(Cle::Historique, self.langue), message)
            }
            Etat::Parametres => (
                titre(Cle::Parametres, self.langue),
                self.t(Cle::Parametres).to_string(),
            ),
            Etat::ReglageMode => (
                titre(Cle::ReglageMode, self.langue),
                self.t(Cle::DescriptionMode).to_string(),
            ),
            _ => (NOM_APP.to_string(), String::new()),
        };
        let options = self
            .actions(etat)
            .into_iter()
            .map(|a| self.libelle(a).to_string())
            .collect();
        Ecran::Choix {
            titre,
            message,
            options,
        }
    }

    /// Actions proposées, dans l’ordre d’affichage.
    fn actions(&self, etat: &Etat) -> Vec<Action> {
        match etat {
            Etat::MenuPrincipal => vec![
                Action::Commencer,
                Action::ModeEmploi,
                Action::Historique,
                Action::Parametres,
                Action::Quitter,
            ],
            Etat::Resultat { issue, .. } => {
                let mut v = vec![Action::Continuer, Action::Accueil, Action::Quitter];
                if issue.est_succes() {
                    v.push(Action::Memoriser);
                }
                v
            }
            Etat::Historique => vec![Action::Retour, Action::Exporter],
            Etat::Parametres => vec![
                Action::Retour,
                Action::EffacerHistorique,
                Action::ReglageMode,
            ],
            Etat::ReglageMode => vec![Action::Retour, Action::BasculerMode],
            _ => Vec::new(),
        }
    }

    fn libelle(&self, action: Action) -> &'static str {
        let cle = match action {
            Action::Commencer => Cle::Commencer,
            Action::ModeEmploi => Cle::ModeEmploi,
            Action::Historique => Cle::Historique,
            Action::Parametres => Cle::Parametres,
            Action::Quitter => Cle::Quitter,
            Action::Continuer => Cle::Continuer,
            Action::Accueil => Cle::Accueil,
            Action::Memoriser => Cle::Memoriser,
            Action::Retour => Cle::Retour,
            Action::Exporter => Cle::Exporter,
            Action::EffacerHistorique => Cle::EffacerHistorique,
            Action::ReglageMode => Cle::ReglageMode,
            // le bouton affiche l’état courant du mode
            Action::BasculerMode => match self.session.mode() {
                ModeConfiance::Restreint => Cle::ModeRestreintActive,
                ModeConfiance::Libre => Cle::ModeRestreintDesactive,
            },
        };
        self.t(cle)
    }

    /// Valeur formatée, ou libellé localisé du genre d’échec.
    fn affichage(&self, issue: &Issue) -> String {
        match issue {
            Issue::Succes { valeur } => valeur.clone(),
            Issue::Echec { genre, .. } => libelle_erreur(*genre, self.langue).to_string(),
        }
    }

    /* ------------------------ Transitions ------------------------ */

    pub fn repondre(&mut self, reponse: Reponse) {
        let etat = mem::replace(&mut self.etat, Etat::Termine);
        self.etat = self.transition(etat, reponse);
        debug!(etat = ?self.etat, "transition");
    }

    /// Fermeture de fenêtre demandée : on passe par la confirmation de sortie.
    pub fn demander_sortie(&mut self) {
        if matches!(self.etat, Etat::Termine | Etat::ConfirmationSortie { .. }) {
            return;
        }
        let retour = mem::replace(&mut self.etat, Etat::Termine);
        self.etat = Etat::ConfirmationSortie {
            retour: Box::new(retour),
        };
    }

    fn transition(&mut self, etat: Etat, reponse: Reponse) -> Etat {
        match (etat, reponse) {
            (Etat::Termine, _) => Etat::Termine,

            (Etat::Calcul, Reponse::Texte(expression)) => self.calculer(expression),
            (Etat::Calcul, Reponse::Annule) => Etat::MenuPrincipal,

            (Etat::SaisieChemin, Reponse::Texte(chemin)) => self.exporter(&chemin),
            (Etat::SaisieChemin, Reponse::Annule) => Etat::Historique,

            (Etat::ConfirmationSortie { .. }, Reponse::Confirme(true)) => {
                info!("fin de session");
                Etat::Termine
            }
            (Etat::ConfirmationSortie { retour }, Reponse::Confirme(false) | Reponse::Annule) => {
                *retour
            }

            (Etat::ConfirmationEffacement, Reponse::Confirme(true)) => {
                self.session.effacer_historique();
                Etat::Parametres
            }
            (Etat::ConfirmationEffacement, Reponse::Confirme(false) | Reponse::Annule) => {
                Etat::Parametres
            }

            (Etat::Message { suite, .. }, Reponse::Vu | Reponse::Annule) => *suite,

            (etat, Reponse::Choix(libelle)) => {
                let action = self
                    .actions(&etat)
                    .into_iter()
                    .find(|a| self.libelle(*a) == libelle);
                match action {
                    Some(action) => self.agir(etat, action),
                    None => {
                        debug!(%libelle, "choix inconnu ignoré");
                        etat
                    }
                }
            }
            (etat, Reponse::Annule) => Self::annuler(etat),

            // réponse sans rapport avec l’écran : rien ne bouge
            (etat, _) => etat,
        }
    }

    fn annuler(etat: Etat) -> Etat {
        match etat {
            Etat::Resultat { .. } => Etat::Calcul,
            Etat::Historique | Etat::Parametres => Etat::MenuPrincipal,
            Etat::ReglageMode => Etat::Parametres,
            autre => autre,
        }
    }

    fn agir(&mut self, etat: Etat, action: Action) -> Etat {
        match (etat, action) {
            (Etat::MenuPrincipal, Action::Commencer) => Etat::Calcul,
            (Etat::MenuPrincipal, Action::ModeEmploi) => Etat::Message {
                titre: titre(Cle::ModeEmploi, self.langue),
                texte: self.mode_emploi(),
                suite: Box::new(Etat::MenuPrincipal),
            },
            (Etat::MenuPrincipal, Action::Historique) => Etat::Historique,
            (Etat::MenuPrincipal, Action::Parametres) => Etat::Parametres,
            (Etat::MenuPrincipal, Action::Quitter) => Etat::ConfirmationSortie {
                retour: Box::new(Etat::MenuPrincipal),
            },

            (Etat::Resultat { .. }, Action::Continuer) => Etat::Calcul,
            (Etat::Resultat { .. }, Action::Accueil) => Etat::MenuPrincipal,
            (Etat::Resultat { .. }, Action::Quitter) => Etat::ConfirmationSortie {
                retour: Box::new(Etat::Calcul),
            },
            (Etat::Resultat { issue, .. }, Action::Memoriser) => {
                if let Issue::Succes { valeur } = issue {
                    self.session.memoriser(valeur);
                }
                Etat::Calcul
            }

            (Etat::Historique, Action::Retour) => Etat::MenuPrincipal,
            (Etat::Historique, Action::Exporter) => Etat::SaisieChemin,

            (Etat::Parametres, Action::Retour) => Etat::MenuPrincipal,
            (Etat::Parametres, Action::EffacerHistorique) => Etat::ConfirmationEffacement,
            (Etat::Parametres, Action::ReglageMode) => Etat::ReglageMode,

            (Etat::ReglageMode, Action::Retour) => Etat::Parametres,
            (Etat::ReglageMode, Action::BasculerMode) => {
                self.session.basculer_mode();
                Etat::ReglageMode
            }

            (etat, _) => etat,
        }
    }

    /* ------------------------ Effets ------------------------ */

    fn calculer(&mut self, expression: String) -> Etat {
        let issue = self.session.evaluer(&expression);
        let affichage = self.affichage(&issue);
        // enregistré dans tous les cas, succès ou échec
        self.session.enregistrer(expression.clone(), affichage);
        Etat::Resultat { expression, issue }
    }

    fn exporter(&mut self, chemin: &str) -> Etat {
        let contenu = self.session.historique_texte();
        let message = match self.exportateur.exporter(Path::new(chemin), &contenu) {
            Ok(()) => {
                info!(%chemin, "historique exporté");
                self.t(Cle::ExportReussi).to_string()
            }
            Err(e) => {
                warn!(%chemin, erreur = %e, "export impossible");
                let raison = match e {
                    ErreurExport::CheminIntrouvable => Cle::ExportCheminIntrouvable,
                    ErreurExport::Ecriture(_) => Cle::ExportEcriture,
                    ErreurExport::Inconnue(_) => Cle::ExportInconnu,
                };
                format!(
                    "{}\n{}{}",
                    self.t(Cle::ExportEchec),
                    self.t(Cle::Raison),
                    self.t(raison)
                )
            }
        };
        Etat::Message {
            titre: NOM_APP.to_string(),
            texte: message,
            suite: Box::new(Etat::MenuPrincipal),
        }
    }

    /// Mode d’emploi généré depuis le registre du mode courant.
    fn mode_emploi(&self) -> String {
        let mode = self.session.mode();
        let mut s = String::new();
        s.push_str(self.t(Cle::IntroModeEmploi));
        s.push_str("\n\n");
        s.push_str(self.t(Cle::MemoireActuelle));
        s.push_str(self.session.memoire());
        s.push_str("\n\n");
        s.push_str(self.t(Cle::FonctionsDisponibles));
        s.push('\n');
        let signatures: Vec<String> = Fonction::disponibles(mode)
            .map(|f| signature(f, mode))
            .collect();
        for ligne in signatures.chunks(4) {
            s.push_str("  ");
            s.push_str(&ligne.join("  "));
            s.push('\n');
        }
        s
    }
}
