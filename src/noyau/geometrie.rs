// src/noyau/geometrie.rs
//
// Aires et hypoténuse du registre restreint.
// Construites sur l’arithmétique de `valeur` : le type du résultat suit les opérandes
// (s_rect(3, 4) reste entier, s_tri passe par une division vraie donc flottant).

use std::f64::consts::PI;

use super::erreurs::ErreurCalcul;
use super::valeur::{ajouter, diviser, multiplier, soustraire, Valeur};

fn deux() -> Valeur {
    Valeur::entier(2)
}

fn racine(v: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let x = v.vers_reel()?;
    if x < 0.0 {
        return Err(ErreurCalcul::valeur("erreur de domaine mathématique"));
    }
    Ok(Valeur::Reel(x.sqrt()))
}

/// Rectangle : base × hauteur.
pub fn aire_rectangle(base: &Valeur, hauteur: &Valeur) -> Result<Valeur, ErreurCalcul> {
    multiplier(base, hauteur)
}

/// Triangle : base × hauteur / 2.
pub fn aire_triangle(base: &Valeur, hauteur: &Valeur) -> Result<Valeur, ErreurCalcul> {
    diviser(&multiplier(base, hauteur)?, &deux())
}

/// Trapèze : (petite base + grande base) × hauteur / 2.
pub fn aire_trapeze(
    petite: &Valeur,
    grande: &Valeur,
    hauteur: &Valeur,
) -> Result<Valeur, ErreurCalcul> {
    diviser(&multiplier(&ajouter(petite, grande)?, hauteur)?, &deux())
}

/// Disque : π × r × r.
pub fn aire_cercle(rayon: &Valeur) -> Result<Valeur, ErreurCalcul> {
    multiplier(&multiplier(&Valeur::Reel(PI), rayon)?, rayon)
}

/// Formule de Héron ; un triangle impossible est une erreur de domaine.
pub fn aire_heron(a: &Valeur, b: &Valeur, c: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let s = diviser(&ajouter(&ajouter(a, b)?, c)?, &deux())?;
    let produit = multiplier(
        &multiplier(&s, &soustraire(&s, a)?)?,
        &multiplier(&soustraire(&s, b)?, &soustraire(&s, c)?)?,
    )?;
    racine(&produit)
}

/// Pythagore : √(a² + b²).
pub fn hypotenuse(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let a = a.vers_reel()?;
    let b = b.vers_reel()?;
    let somme = a.powi(2) + b.powi(2);
    if somme.is_infinite() && a.is_finite() && b.is_finite() {
        return Err(ErreurCalcul::debordement("hypoténuse hors des limites flottantes"));
    }
    Ok(Valeur::Reel(somme.sqrt()))
}
