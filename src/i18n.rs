// src/i18n.rs
//
// Libellés de l’interface (zh par défaut, fr, en)
// -----------------------------------------------
// - Clés fermées (`Cle`) : une clé absente est une erreur de compilation.
// - Les libellés d’erreur suivent les genres fermés du noyau.
// - Les libellés de choix servent aussi d’identifiants (boîtes à boutons).

use clap::ValueEnum;

use crate::noyau::GenreErreur;

/// Nom affiché dans les titres de fenêtres.
pub const NOM_APP: &str = "calculatorMax";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Langue {
    /// 简体中文
    #[default]
    Zh,
    /// Français
    Fr,
    /// English
    En,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cle {
    // accueil
    Slogan,
    Commencer,
    ModeEmploi,
    Historique,
    Parametres,
    Quitter,

    // calcul
    SaisirExpression,
    Resultat,
    Continuer,
    Accueil,
    Memoriser,
    ConfirmerSortie,

    // historique + export
    HistoriqueVide,
    Retour,
    Exporter,
    SaisirChemin,
    ExportReussi,
    ExportEchec,
    Raison,
    ExportCheminIntrouvable,
    ExportEcriture,
    ExportInconnu,

    // paramètres
    EffacerHistorique,
    ConfirmerEffacement,
    ReglageMode,
    DescriptionMode,
    ModeRestreintActive,
    ModeRestreintDesactive,

    // mode d’emploi
    IntroModeEmploi,
    FonctionsDisponibles,
    MemoireActuelle,

    // boutons génériques
    Oui,
    Non,
    Ok,
    Annuler,
}

/// Texte d’une clé dans une langue.
pub fn texte(cle: Cle, langue: Langue) -> &'static str {
    let [zh, fr, en] = match cle {
        Cle::Slogan => [
            "calculatorMax，计算一切结果",
            "calculatorMax, calculer tous les résultats",
            "calculatorMax, compute every result",
        ],
        Cle::Commencer => ["开始计算", "Commencer", "Start"],
        Cle::ModeEmploi => ["使用说明", "Mode d’emploi", "Instructions"],
        Cle::Historique => ["历史记录", "Historique", "History"],
        Cle::Parametres => ["设置", "Paramètres", "Settings"],
        Cle::Quitter => ["退出", "Quitter", "Exit"],

        Cle::SaisirExpression => ["请输入算式", "Saisir une expression", "Enter an expression"],
        Cle::Resultat => ["结果", "Résultat", "Result"],
        Cle::Continuer => ["继续", "Continuer", "Continue"],
        Cle::Accueil => ["返回首页", "Accueil", "Home"],
        Cle::Memoriser => ["记忆", "Mémoriser", "Remember"],
        Cle::ConfirmerSortie => ["确定退出？", "Quitter vraiment ?", "Really exit?"],

        Cle::HistoriqueVide => ["（暂无历史记录）", "(historique vide)", "(no history yet)"],
        Cle::Retour => ["返回", "Retour", "Back"],
        Cle::Exporter => ["存储", "Exporter", "Export"],
        Cle::SaisirChemin => [
            "请输入存储文件路径，请确保该文件存在且不为空",
            "Chemin du fichier d’export (le dossier doit exister)",
            "Path of the export file (its folder must exist)",
        ],
        Cle::ExportReussi => ["存储完成！", "Export terminé !", "Export complete!"],
        Cle::ExportEchec => ["存储失败！", "Échec de l’export !", "Export failed!"],
        Cle::Raison => ["原因：", "Raison : ", "Reason: "],
        Cle::ExportCheminIntrouvable => [
            "该路径不是一个文本文件或不存在。",
            "ce chemin n’existe pas ou n’est pas un fichier texte.",
            "the path does not exist or is not a text file.",
        ],
        Cle::ExportEcriture => [
            "写文件时出错。",
            "erreur pendant l’écriture du fichier.",
            "error while writing the file.",
        ],
        Cle::ExportInconnu => ["未知错误。", "erreur inconnue.", "unknown error."],

        Cle::EffacerHistorique => ["清空历史记录", "Effacer l’historique", "Clear history"],
        Cle::ConfirmerEffacement => [
            "确定清空历史记录吗？",
            "Effacer tout l’historique ?",
            "Clear the whole history?",
        ],
        Cle::ReglageMode => ["安全模式设置", "Mode restreint", "Restricted mode"],
        Cle::DescriptionMode => [
            "安全模式只能执行指定的数学函数，比普通模式更加安全。\
             普通模式可以使用完整的表达式语法，请只输入你信任的算式。",
            "Le mode restreint n’accepte que l’arithmétique et une liste fixe de fonctions. \
             Le mode libre accepte toute la grammaire : n’y saisir que des expressions de confiance.",
            "Restricted mode only accepts arithmetic and a fixed list of functions. \
             Unrestricted mode accepts the whole grammar: only enter expressions you trust.",
        ],
        Cle::ModeRestreintActive => ["安全模式：开", "Mode restreint : activé", "Restricted mode: on"],
        Cle::ModeRestreintDesactive => [
            "安全模式：关",
            "Mode restreint : désactivé",
            "Restricted mode: off",
        ],

        Cle::IntroModeEmploi => [
            "输入算式后确认即可计算，结果会记入历史记录。\
             计算成功后可选择“记忆”，在安全模式下用 m 读取记忆的值。",
            "Saisir une expression puis valider : le résultat est ajouté à l’historique. \
             Après un succès, « Mémoriser » garde la valeur, lue par m en mode restreint.",
            "Enter an expression and confirm: the result is added to the history. \
             After a success, \"Remember\" keeps the value, read back with m in restricted mode.",
        ],
        Cle::FonctionsDisponibles => ["可用函数：", "Fonctions disponibles :", "Available functions:"],
        Cle::MemoireActuelle => ["当前记忆：", "Mémoire actuelle : ", "Current memory: "],

        Cle::Oui => ["是", "Oui", "Yes"],
        Cle::Non => ["否", "Non", "No"],
        Cle::Ok => ["确定", "OK", "OK"],
        Cle::Annuler => ["取消", "Annuler", "Cancel"],
    };
    match langue {
        Langue::Zh => zh,
        Langue::Fr => fr,
        Langue::En => en,
    }
}

/// Titre de fenêtre d’une section : `结果-calculatorMax`.
pub fn titre(section: Cle, langue: Langue) -> String {
    format!("{}-{NOM_APP}", texte(section, langue))
}

/// Libellé affiché (et mémorisé dans l’historique) pour un genre d’échec.
pub fn libelle_erreur(genre: GenreErreur, langue: Langue) -> &'static str {
    let [zh, fr, en] = match genre {
        GenreErreur::Debordement => ["浮点数溢出", "Dépassement flottant", "Overflow"],
        GenreErreur::DivisionParZero => ["除零", "Division par zéro", "Division by zero"],
        GenreErreur::VirguleFlottante => [
            "浮点数异常",
            "Exception flottante",
            "Floating point error",
        ],
        GenreErreur::Valeur => ["值错误", "Erreur de valeur", "Value error"],
        GenreErreur::Type => ["类型错误", "Erreur de type", "Type error"],
        GenreErreur::PasUnNombre => ["不是数字", "Pas un nombre", "Not a number"],
        GenreErreur::Infini => ["溢出", "Infini", "Infinite"],
        GenreErreur::Illisible => [
            "可能不是数学算式",
            "Probablement pas une expression mathématique",
            "Probably not a math expression",
        ],
        GenreErreur::Inconnue => ["未知错误", "Erreur inconnue", "Unknown error"],
    };
    match langue {
        Langue::Zh => zh,
        Langue::Fr => fr,
        Langue::En => en,
    }
}
