// src/noyau/erreurs.rs
//
// Erreurs du noyau + classification.
// - ErreurCalcul : ce qui peut échouer pendant jetons/RPN/validation/évaluation/format
// - GenreErreur  : taxonomie fermée vue par la session (ordre = ordre de détection)
//
// Règle : aucune erreur ne sort du noyau sans passer par `classer`.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurCalcul {
    #[error("débordement : {0}")]
    Debordement(String),

    #[error("division par zéro : {0}")]
    DivisionParZero(String),

    #[error("opération flottante invalide : {0}")]
    VirguleFlottante(String),

    #[error("valeur invalide : {0}")]
    Valeur(String),

    #[error("type invalide : {0}")]
    Type(String),

    #[error("le résultat n’est pas un nombre")]
    PasUnNombre,

    #[error("le résultat est infini")]
    Infini,

    #[error("syntaxe : {0}")]
    Syntaxe(String),

    #[error("nom inconnu : {0}")]
    NomInconnu(String),

    #[error("limite dépassée : {0}")]
    Limite(String),
}

impl ErreurCalcul {
    pub fn debordement(msg: impl Into<String>) -> Self {
        Self::Debordement(msg.into())
    }
    pub fn division_par_zero(msg: impl Into<String>) -> Self {
        Self::DivisionParZero(msg.into())
    }
    pub fn valeur(msg: impl Into<String>) -> Self {
        Self::Valeur(msg.into())
    }
    pub fn type_(msg: impl Into<String>) -> Self {
        Self::Type(msg.into())
    }
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }
    pub fn limite(msg: impl Into<String>) -> Self {
        Self::Limite(msg.into())
    }
}

/// Genre d’échec (fermé). L’ordre des variantes suit l’ordre de détection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenreErreur {
    Debordement,
    DivisionParZero,
    VirguleFlottante,
    Valeur,
    Type,
    PasUnNombre,
    Infini,
    Illisible,
    Inconnue,
}

#[cfg(test)]
impl GenreErreur {
    pub const TOUS: [GenreErreur; 9] = [
        GenreErreur::Debordement,
        GenreErreur::DivisionParZero,
        GenreErreur::VirguleFlottante,
        GenreErreur::Valeur,
        GenreErreur::Type,
        GenreErreur::PasUnNombre,
        GenreErreur::Infini,
        GenreErreur::Illisible,
        GenreErreur::Inconnue,
    ];
}

/// Classification ordonnée : une erreur typée -> un genre.
///
/// Les erreurs de syntaxe et les noms non résolus tombent dans `Illisible`
/// (l’entrée n’est pas une expression mathématique interprétable).
/// Les garde-fous de ressources tombent dans `Inconnue`.
pub fn classer(err: &ErreurCalcul) -> GenreErreur {
    match err {
        ErreurCalcul::Debordement(_) => GenreErreur::Debordement,
        ErreurCalcul::DivisionParZero(_) => GenreErreur::DivisionParZero,
        ErreurCalcul::VirguleFlottante(_) => GenreErreur::VirguleFlottante,
        ErreurCalcul::Valeur(_) => GenreErreur::Valeur,
        ErreurCalcul::Type(_) => GenreErreur::Type,
        ErreurCalcul::PasUnNombre => GenreErreur::PasUnNombre,
        ErreurCalcul::Infini => GenreErreur::Infini,
        ErreurCalcul::Syntaxe(_) | ErreurCalcul::NomInconnu(_) => GenreErreur::Illisible,
        ErreurCalcul::Limite(_) => GenreErreur::Inconnue,
    }
}
