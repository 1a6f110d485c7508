// src/noyau/format.rs
//
// Affichage canonique d’une valeur (forme `repr` de Python) :
// - entier  : décimal exact (limité à MAX_CHIFFRES chiffres)
// - flottant: plus courte représentation qui se relit à l’identique,
//             notation scientifique hors de [1e-4, 1e16), ".0" si entier
// - booléen : True / False
// - tuple   : (a, b) ; (a,) ; ()

use num_bigint::BigInt;
use num_traits::Signed;

use super::erreurs::ErreurCalcul;
use super::valeur::Valeur;

/// Au-delà, la conversion entier -> texte est refusée.
pub const MAX_CHIFFRES: usize = 4300;

/// Seuil en bits : au-dessus, le nombre a forcément plus de MAX_CHIFFRES chiffres.
const MAX_BITS: u64 = 14_300;

pub fn formater(v: &Valeur) -> Result<String, ErreurCalcul> {
    match v {
        Valeur::Booleen(true) => Ok("True".to_string()),
        Valeur::Booleen(false) => Ok("False".to_string()),
        Valeur::Entier(n) => formater_entier(n),
        Valeur::Reel(x) => Ok(formater_reel(*x)),
        Valeur::Tuple(items) => {
            let parts = items.iter().map(formater).collect::<Result<Vec<_>, _>>()?;
            Ok(match parts.len() {
                1 => format!("({},)", parts[0]),
                _ => format!("({})", parts.join(", ")),
            })
        }
    }
}

pub fn formater_entier(n: &BigInt) -> Result<String, ErreurCalcul> {
    let trop_long = || {
        ErreurCalcul::valeur(format!(
            "entier trop long pour être affiché (plus de {MAX_CHIFFRES} chiffres)"
        ))
    };

    // refus avant conversion : la conversion elle-même est coûteuse
    if n.bits() > MAX_BITS {
        return Err(trop_long());
    }
    let s = n.to_string();
    let chiffres = if n.is_negative() { s.len() - 1 } else { s.len() };
    if chiffres > MAX_CHIFFRES {
        return Err(trop_long());
    }
    Ok(s)
}

pub fn formater_reel(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:?}` donne déjà la plus courte forme relisible, avec ".0" et les mêmes seuils
    // de notation scientifique ; seul l’exposant diffère ("1e16" -> "1e+16", "1e-5" -> "1e-05").
    let brut = format!("{x:?}");
    match brut.split_once('e') {
        Some((mantisse, exposant)) => {
            let (signe, chiffres) = match exposant.strip_prefix('-') {
                Some(c) => ('-', c),
                None => ('+', exposant),
            };
            format!("{mantisse}e{signe}{chiffres:0>2}")
        }
        None => brut,
    }
}
