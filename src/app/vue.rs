// src/app/vue.rs
//
// Vue (UI egui) — boîtes de dialogue
// ----------------------------------
// Objectifs :
// - Un écran du contrôleur = une “boîte” : titre, message, boutons.
// - Clavier : Enter valide la saisie (quand le champ est focus), Échap annule (app.rs).
// - Le focus revient au champ à chaque nouvel écran de saisie (focus_entree).
//
// La vue ne décide rien : elle collecte au plus une réponse par frame
// et la transmet après le dessin (pas d’emprunt croisé avec le contrôleur).

use eframe::egui;

use crate::i18n::{texte, Cle};

use super::controleur::{Ecran, Reponse};
use super::etat::AppCalc;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        let reponse = match self.controleur.ecran() {
            Ecran::Choix {
                titre,
                message,
                options,
            } => {
                Self::entete(ui, &titre, &message);
                Self::ui_choix(ui, &options)
            }
            Ecran::Saisie { titre, message } => {
                Self::entete(ui, &titre, &message);
                self.ui_saisie(ui)
            }
            Ecran::Confirmation { titre, message } => {
                Self::entete(ui, &titre, &message);
                self.ui_confirmation(ui)
            }
            Ecran::Information { titre, message } => {
                Self::entete(ui, &titre, &message);
                self.ui_information(ui)
            }
            Ecran::Fin => None,
        };

        if let Some(r) = reponse {
            self.repondre(r);
        }
    }

    fn entete(ui: &mut egui::Ui, titre: &str, message: &str) {
        ui.heading(titre);
        ui.add_space(6.0);

        // historique / mode d’emploi : potentiellement long
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                egui::ScrollArea::vertical()
                    .max_height((ui.available_height() - 60.0).max(80.0))
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        ui.label(message);
                    });
            });

        ui.add_space(8.0);
    }

    fn ui_choix(ui: &mut egui::Ui, options: &[String]) -> Option<Reponse> {
        let mut choisi = None;
        ui.horizontal_wrapped(|ui| {
            for o in options {
                if Self::bouton(ui, o).clicked() {
                    choisi = Some(Reponse::Choix(o.clone()));
                }
            }
        });
        choisi
    }

    fn ui_saisie(&mut self, ui: &mut egui::Ui) -> Option<Reponse> {
        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .id_source("saisie_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter : un champ une ligne perd le focus au moment où Enter est pressé
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        let valide = (resp.has_focus() || resp.lost_focus()) && enter;

        ui.add_space(6.0);

        let langue = self.controleur.langue();
        let mut reponse = None;
        ui.horizontal(|ui| {
            if Self::bouton(ui, texte(Cle::Ok, langue)).clicked() || valide {
                reponse = Some(Reponse::Texte(self.entree.clone()));
            }
            if Self::bouton(ui, texte(Cle::Annuler, langue)).clicked() {
                reponse = Some(Reponse::Annule);
            }
        });
        reponse
    }

    fn ui_confirmation(&mut self, ui: &mut egui::Ui) -> Option<Reponse> {
        let langue = self.controleur.langue();
        let mut reponse = None;
        ui.horizontal(|ui| {
            if Self::bouton(ui, texte(Cle::Oui, langue)).clicked() {
                reponse = Some(Reponse::Confirme(true));
            }
            if Self::bouton(ui, texte(Cle::Non, langue)).clicked() {
                reponse = Some(Reponse::Confirme(false));
            }
        });
        reponse
    }

    fn ui_information(&mut self, ui: &mut egui::Ui) -> Option<Reponse> {
        let ok = Self::bouton(ui, texte(Cle::Ok, self.controleur.langue()));
        ok.clicked().then_some(Reponse::Vu)
    }

    fn bouton(ui: &mut egui::Ui, libelle: &str) -> egui::Response {
        ui.add(egui::Button::new(libelle).min_size(egui::vec2(72.0, 30.0)))
    }
}
