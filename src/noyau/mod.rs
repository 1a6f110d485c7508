//! Noyau de calcul (sans interface)
//!
//! Organisation interne :
//! - erreurs.rs   : erreurs typées + classement en genres fermés
//! - jetons.rs    : tokenisation (littéraux façon Python) + substitution m/pi/e
//! - rpn.rs       : shunting-yard + construction Expr
//! - expr.rs      : AST + opérateurs et précédences
//! - valeur.rs    : valeurs (bool, entier non borné, flottant, tuple) + arithmétique
//! - registre.rs  : fonctions appelables (liste blanche + supplément libre)
//! - geometrie.rs : aires et hypoténuse
//! - format.rs    : affichage canonique des valeurs
//! - eval.rs      : pipeline complet + modes de confiance

pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod geometrie;
pub mod jetons;
pub mod registre;
pub mod rpn;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::GenreErreur;
pub use eval::{evaluer, Issue, ModeConfiance};
