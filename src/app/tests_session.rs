//! Tests de session (bout en bout) : dialogues scriptés + pilote bloquant.
//!
//! But : rejouer des parcours complets comme un utilisateur devant les boîtes.
//! - Chaque réponse du script doit tomber sur le bon type de boîte (sinon panique).
//! - Script épuisé => entrée fermée (ErreurDialogue::Fermee).
//! - Export : exportateur factice (journal des écritures + échec programmable),
//!   plus un passage réel sur disque (tempfile).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::i18n::Langue;
use crate::noyau::ModeConfiance;

use super::controleur::Controleur;
use super::dialogues::{piloter, Dialogues, ErreurDialogue};
use super::etat::Session;
use super::export::{ErreurExport, ExportFichier, Exportateur};

/* ------------------------ Dialogues scriptés ------------------------ */

#[derive(Debug)]
enum Pas {
    Choix(&'static str),
    Texte(String),
    Oui,
    Non,
    Annule,
    Vu,
}

/// Une boîte telle que l’utilisateur l’a vue.
#[derive(Clone, Debug)]
struct Vue {
    titre: String,
    message: String,
    options: Vec<String>,
}

struct Script {
    pas: VecDeque<Pas>,
    vues: Vec<Vue>,
}

impl Script {
    fn new(pas: Vec<Pas>) -> Self {
        Self {
            pas: pas.into(),
            vues: Vec::new(),
        }
    }

    fn suivant(&mut self, titre: &str, message: &str, options: &[String]) -> Option<Pas> {
        self.vues.push(Vue {
            titre: titre.to_string(),
            message: message.to_string(),
            options: options.to_vec(),
        });
        self.pas.pop_front()
    }

    fn derniere_vue(&self) -> &Vue {
        self.vues.last().expect("au moins une boîte vue")
    }

    fn vues_titrees(&self, titre: &str) -> Vec<&Vue> {
        self.vues.iter().filter(|v| v.titre == titre).collect()
    }
}

impl Dialogues for Script {
    fn choisir(
        &mut self,
        titre: &str,
        message: &str,
        options: &[String],
    ) -> Result<Option<String>, ErreurDialogue> {
        match self.suivant(titre, message, options) {
            None => Err(ErreurDialogue::Fermee),
            Some(Pas::Choix(l)) => {
                assert!(
                    options.iter().any(|o| o == l),
                    "choix {l:?} absent de {options:?} ({titre})"
                );
                Ok(Some(l.to_string()))
            }
            Some(Pas::Annule) => Ok(None),
            Some(autre) => panic!("boîte à choix ({titre}), script: {autre:?}"),
        }
    }

    fn saisir(&mut self, titre: &str, message: &str) -> Result<Option<String>, ErreurDialogue> {
        match self.suivant(titre, message, &[]) {
            None => Err(ErreurDialogue::Fermee),
            Some(Pas::Texte(t)) => Ok(Some(t)),
            Some(Pas::Annule) => Ok(None),
            Some(autre) => panic!("saisie ({message}), script: {autre:?}"),
        }
    }

    fn confirmer(&mut self, titre: &str, message: &str) -> Result<bool, ErreurDialogue> {
        match self.suivant(titre, message, &[]) {
            None => Err(ErreurDialogue::Fermee),
            Some(Pas::Oui) => Ok(true),
            Some(Pas::Non) | Some(Pas::Annule) => Ok(false),
            Some(autre) => panic!("confirmation ({message}), script: {autre:?}"),
        }
    }

    fn informer(&mut self, titre: &str, message: &str) -> Result<(), ErreurDialogue> {
        match self.suivant(titre, message, &[]) {
            None => Err(ErreurDialogue::Fermee),
            Some(Pas::Vu) | Some(Pas::Annule) => Ok(()),
            Some(autre) => panic!("message ({message}), script: {autre:?}"),
        }
    }
}

fn texte(s: &str) -> Pas {
    Pas::Texte(s.to_string())
}

/* ------------------------ Export factice ------------------------ */

#[derive(Clone, Default)]
struct ExportFactice {
    ecrits: Rc<RefCell<Vec<(PathBuf, String)>>>,
    echec: Option<ErreurExport>,
}

impl Exportateur for ExportFactice {
    fn exporter(&self, chemin: &Path, texte: &str) -> Result<(), ErreurExport> {
        if let Some(e) = &self.echec {
            return Err(e.clone());
        }
        self.ecrits
            .borrow_mut()
            .push((chemin.to_path_buf(), texte.to_string()));
        Ok(())
    }
}

fn controleur_avec(mode: ModeConfiance, export: ExportFactice) -> Controleur {
    Controleur::new(Session::new(mode), Langue::Zh, Box::new(export))
}

fn jouer(controleur: &mut Controleur, pas: Vec<Pas>) -> Script {
    let mut script = Script::new(pas);
    piloter(controleur, &mut script).expect("session terminée proprement");
    assert!(controleur.est_termine());
    assert!(script.pas.is_empty(), "script non consommé: {:?}", script.pas);
    script
}

/* ------------------------ Parcours ------------------------ */

#[test]
fn session_calcul_memoire_historique() {
    let mut c = controleur_avec(ModeConfiance::Restreint, ExportFactice::default());
    let script = jouer(
        &mut c,
        vec![
            Pas::Choix("开始计算"),
            texte("2+2"),
            Pas::Choix("记忆"),
            texte("m*10"),
            Pas::Choix("继续"),
            texte("sqrt(-1)"),
            Pas::Choix("返回首页"),
            Pas::Choix("历史记录"),
            Pas::Choix("返回"),
            Pas::Choix("退出"),
            Pas::Oui,
        ],
    );

    let resultats = script.vues_titrees("结果-calculatorMax");
    let messages: Vec<&str> = resultats.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(messages, vec!["2+2=4", "m*10=40", "sqrt(-1)=值错误"]);
    // “记忆” seulement après un succès
    assert!(resultats[1].options.iter().any(|o| o == "记忆"));
    assert!(!resultats[2].options.iter().any(|o| o == "记忆"));

    let historique = script.vues_titrees("历史记录-calculatorMax");
    assert_eq!(historique.len(), 1);
    assert_eq!(historique[0].message, "2+2=4\nm*10=40\nsqrt(-1)=值错误\n");

    assert_eq!(c.session().memoire(), "4");
    assert_eq!(script.derniere_vue().message, "确定退出？");
}

#[test]
fn session_reevaluation_remplace_sur_place() {
    let mut c = controleur_avec(ModeConfiance::Restreint, ExportFactice::default());
    jouer(
        &mut c,
        vec![
            Pas::Choix("开始计算"),
            texte("m+1"),
            Pas::Choix("继续"),
            texte("7"),
            Pas::Choix("记忆"),
            texte("m+1"),
            Pas::Choix("退出"),
            Pas::Oui,
        ],
    );
    assert_eq!(c.session().historique_texte(), "m+1=8\n7=7\n");
}

#[test]
fn session_effacement_confirme_ou_non() {
    let mut c = controleur_avec(ModeConfiance::Libre, ExportFactice::default());
    jouer(
        &mut c,
        vec![
            Pas::Choix("开始计算"),
            texte("1/0"),
            Pas::Choix("返回首页"),
            Pas::Choix("设置"),
            Pas::Choix("清空历史记录"),
            Pas::Non,
            Pas::Choix("返回"),
            Pas::Choix("退出"),
            Pas::Oui,
        ],
    );
    assert_eq!(c.session().historique_texte(), "1/0=除零\n");

    let mut c = controleur_avec(ModeConfiance::Libre, ExportFactice::default());
    let script = jouer(
        &mut c,
        vec![
            Pas::Choix("开始计算"),
            texte("1/0"),
            Pas::Choix("返回首页"),
            Pas::Choix("设置"),
            Pas::Choix("清空历史记录"),
            Pas::Oui,
            Pas::Choix("返回"),
            Pas::Choix("历史记录"),
            Pas::Choix("返回"),
            Pas::Choix("退出"),
            Pas::Oui,
        ],
    );
    assert!(c.session().historique_vide());
    let historique = script.vues_titrees("历史记录-calculatorMax");
    assert_eq!(historique[0].message, "（暂无历史记录）");
}

#[test]
fn session_bascule_du_mode() {
    let mut c = controleur_avec(ModeConfiance::Libre, ExportFactice::default());
    let script = jouer(
        &mut c,
        vec![
            Pas::Choix("开始计算"),
            texte("m+1"),
            Pas::Choix("返回首页"),
            Pas::Choix("设置"),
            Pas::Choix("安全模式设置"),
            Pas::Choix("安全模式：关"),
            Pas::Choix("返回"),
            Pas::Choix("返回"),
            Pas::Choix("开始计算"),
            texte("m+1"),
            Pas::Choix("返回首页"),
            Pas::Choix("设置"),
            Pas::Choix("安全模式设置"),
            Pas::Choix("安全模式：开"),
            Pas::Choix("安全模式：关"),
            Pas::Annule,
            Pas::Annule,
            Pas::Choix("退出"),
            Pas::Oui,
        ],
    );

    let resultats = script.vues_titrees("结果-calculatorMax");
    assert_eq!(resultats[0].message, "m+1=可能不是数学算式");
    assert_eq!(resultats[1].message, "m+1=1");
    // trois bascules depuis le mode libre
    assert_eq!(c.session().mode(), ModeConfiance::Restreint);
}

#[test]
fn session_export_reussi() {
    let export = ExportFactice::default();
    let ecrits = Rc::clone(&export.ecrits);
    let mut c = controleur_avec(ModeConfiance::Libre, export);
    let script = jouer(
        &mut c,
        vec![
            Pas::Choix("开始计算"),
            texte("2**10"),
            Pas::Choix("返回首页"),
            Pas::Choix("历史记录"),
            Pas::Choix("存储"),
            texte("/tmp/h.txt"),
            Pas::Vu,
            Pas::Choix("退出"),
            Pas::Oui,
        ],
    );

    assert_eq!(
        *ecrits.borrow(),
        vec![(PathBuf::from("/tmp/h.txt"), "2**10=1024\n".to_string())]
    );
    let message = script
        .vues
        .iter()
        .find(|v| v.message.starts_with("存储"))
        .expect("message d’export");
    assert_eq!(message.message, "存储完成！");
}

#[test]
fn session_export_echecs_non_fatals() {
    let cas = [
        (
            ErreurExport::CheminIntrouvable,
            "存储失败！\n原因：该路径不是一个文本文件或不存在。",
        ),
        (
            ErreurExport::Ecriture(std::io::ErrorKind::PermissionDenied),
            "存储失败！\n原因：写文件时出错。",
        ),
        (
            ErreurExport::Inconnue("octet nul".into()),
            "存储失败！\n原因：未知错误。",
        ),
    ];
    for (erreur, attendu) in cas {
        let export = ExportFactice {
            echec: Some(erreur),
            ..ExportFactice::default()
        };
        let mut c = controleur_avec(ModeConfiance::Libre, export);
        let script = jouer(
            &mut c,
            vec![
                Pas::Choix("历史记录"),
                Pas::Choix("存储"),
                texte("/nulle/part.txt"),
                Pas::Vu,
                // retour à l’accueil après le message
                Pas::Choix("退出"),
                Pas::Oui,
            ],
        );
        let message = &script.vues[3];
        assert_eq!(message.titre, "calculatorMax");
        assert_eq!(message.message, attendu);
    }
}

#[test]
fn session_export_sur_disque() {
    let dir = tempfile::tempdir().expect("tempdir");
    let chemin = dir.path().join("historique.txt");

    let mut c = Controleur::new(
        Session::new(ModeConfiance::Restreint),
        Langue::En,
        Box::new(ExportFichier),
    );
    jouer(
        &mut c,
        vec![
            Pas::Choix("Start"),
            texte("s_rect(3, 4)"),
            Pas::Choix("Continue"),
            texte("1e308*10"),
            Pas::Choix("Home"),
            Pas::Choix("History"),
            Pas::Choix("Export"),
            Pas::Texte(chemin.display().to_string()),
            Pas::Vu,
            Pas::Choix("Exit"),
            Pas::Oui,
        ],
    );
    assert_eq!(
        fs::read_to_string(&chemin).expect("fichier exporté"),
        "s_rect(3, 4)=12\n1e308*10=Infinite\n"
    );
}

#[test]
fn session_annulation_de_saisie_n_enregistre_rien() {
    let mut c = controleur_avec(ModeConfiance::Libre, ExportFactice::default());
    jouer(
        &mut c,
        vec![
            Pas::Choix("开始计算"),
            Pas::Annule,
            Pas::Choix("退出"),
            Pas::Non,
            Pas::Choix("退出"),
            Pas::Oui,
        ],
    );
    assert!(c.session().historique_vide());
}

#[test]
fn entree_fermee_remonte_une_erreur() {
    let mut c = controleur_avec(ModeConfiance::Libre, ExportFactice::default());
    let mut script = Script::new(vec![Pas::Choix("开始计算"), texte("1+1")]);
    let r = piloter(&mut c, &mut script);
    assert!(matches!(r, Err(ErreurDialogue::Fermee)), "r={r:?}");
    // ce qui a été fait avant la fermeture reste en session
    assert_eq!(c.session().historique_texte(), "1+1=2\n");
    assert!(!c.est_termine());
}
