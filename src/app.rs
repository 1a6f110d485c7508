// src/app.rs
//
// calculatorMax — module App (racine)
// -----------------------------------
// Rôle:
// - Déclarer les sous-modules (session, contrôleur, présentations, export)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App
//
// Important:
// - Enter est géré dans vue.rs (quand le champ a le focus).
// - La croix de la fenêtre ne ferme pas directement : elle passe par “确定退出？”.

pub mod console;
pub mod controleur;
pub mod dialogues;
pub mod etat;
pub mod export;
pub mod vue;

#[cfg(test)]
mod tests_session;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use controleur::Reponse;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Fermeture demandée par le système : on annule et on demande confirmation.
        let fermeture = ctx.input(|i| i.viewport().close_requested());
        if fermeture && !self.controleur.est_termine() {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.controleur.demander_sortie();
        }

        // ESC = annuler la boîte courante (choix le moins destructeur).
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.repondre(Reponse::Annule);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });

        if self.controleur.est_termine() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
