// src/noyau/valeur.rs
//
// Valeurs du langage + arithmétique.
// - Booleen : se comporte comme 0/1 dans les calculs
// - Entier  : entier non borné (BigInt)
// - Reel    : f64
// - Tuple   : résultat composé (ex: modf), jamais décomposé
//
// Sémantique alignée sur l’arithmétique “à la Python” :
// - int/int -> flottant correctement arrondi (via rationnel exact)
// - // et % : division plancher (signe du diviseur)
// - un flottant qui devient ∞ n’est PAS une erreur ici (contrôle a posteriori dans eval.rs)
// - un NaN produit à partir d’opérandes non-NaN est une exception flottante (opération invalide IEEE)

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreurs::ErreurCalcul;
use super::expr::{OpBinaire, OpUnaire};

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Booleen(bool),
    Entier(BigInt),
    Reel(f64),
    Tuple(Vec<Valeur>),
}

/// Vue numérique d’une valeur (booléen déjà ramené à 0/1).
#[derive(Clone, Debug)]
pub(crate) enum Nombre {
    Entier(BigInt),
    Reel(f64),
}

/// Garde-fous de ressources (mode restreint).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limites {
    /// |base| et |exposant| au-delà : refus (comme simpleeval MAX_POWER).
    pub puissance_max: u64,
    /// factorial(n) au-delà : refus.
    pub factorielle_max: u64,
}

impl Limites {
    pub const RESTREINT: Limites = Limites {
        puissance_max: 4_000_000,
        factorielle_max: 10_000,
    };

    fn verifier_puissance(&self, x: &Nombre, y: &Nombre) -> Result<(), ErreurCalcul> {
        let max = self.puissance_max;
        let trop_grand = |n: &Nombre| match n {
            Nombre::Entier(i) => i.abs() > BigInt::from(max),
            Nombre::Reel(r) => r.abs() > max as f64,
        };
        if trop_grand(x) || trop_grand(y) {
            return Err(ErreurCalcul::limite(format!(
                "puissance refusée (opérandes limités à {max})"
            )));
        }
        Ok(())
    }
}

impl Valeur {
    pub fn entier(n: impl Into<BigInt>) -> Self {
        Valeur::Entier(n.into())
    }

    /// Nom du type, pour les messages d’erreur.
    pub fn nom_type(&self) -> &'static str {
        match self {
            Valeur::Booleen(_) => "bool",
            Valeur::Entier(_) => "int",
            Valeur::Reel(_) => "float",
            Valeur::Tuple(_) => "tuple",
        }
    }

    /// Vérité (and/or/not).
    pub fn est_vrai(&self) -> bool {
        match self {
            Valeur::Booleen(b) => *b,
            Valeur::Entier(n) => !n.is_zero(),
            Valeur::Reel(x) => *x != 0.0,
            Valeur::Tuple(items) => !items.is_empty(),
        }
    }

    pub(crate) fn nombre(&self) -> Option<Nombre> {
        match self {
            Valeur::Booleen(b) => Some(Nombre::Entier(BigInt::from(u8::from(*b)))),
            Valeur::Entier(n) => Some(Nombre::Entier(n.clone())),
            Valeur::Reel(x) => Some(Nombre::Reel(*x)),
            Valeur::Tuple(_) => None,
        }
    }

    /// Conversion vers f64 (argument d’une fonction math).
    pub fn vers_reel(&self) -> Result<f64, ErreurCalcul> {
        match self.nombre() {
            Some(Nombre::Entier(n)) => entier_vers_reel(&n),
            Some(Nombre::Reel(x)) => Ok(x),
            None => Err(ErreurCalcul::type_(format!(
                "un nombre réel est requis, pas '{}'",
                self.nom_type()
            ))),
        }
    }

    /// Conversion vers entier exact : les flottants sont refusés.
    pub fn vers_entier(&self, fonction: &str) -> Result<BigInt, ErreurCalcul> {
        match self {
            Valeur::Booleen(b) => Ok(BigInt::from(u8::from(*b))),
            Valeur::Entier(n) => Ok(n.clone()),
            _ => Err(ErreurCalcul::type_(format!(
                "{fonction}() n’accepte que des entiers, pas '{}'",
                self.nom_type()
            ))),
        }
    }

    /// Relit le contenu de la mémoire (chaîne formatée) comme un nombre.
    pub fn depuis_memoire(brut: &str) -> Result<Valeur, ErreurCalcul> {
        let t = brut.trim();
        if let Ok(n) = t.parse::<BigInt>() {
            return Ok(Valeur::Entier(n));
        }
        match t {
            "True" => return Ok(Valeur::Booleen(true)),
            "False" => return Ok(Valeur::Booleen(false)),
            _ => {}
        }
        t.parse::<f64>().map(Valeur::Reel).map_err(|_| {
            ErreurCalcul::type_(format!("la mémoire ne contient pas un nombre : {t:?}"))
        })
    }
}

/// int -> float, comme Python : trop grand => débordement.
pub fn entier_vers_reel(n: &BigInt) -> Result<f64, ErreurCalcul> {
    n.to_f64()
        .filter(|x| x.is_finite())
        .ok_or_else(|| ErreurCalcul::debordement("entier trop grand pour un flottant"))
}

/* ------------------------ Helpers opérandes ------------------------ */

fn paire(a: &Valeur, b: &Valeur, symbole: &str) -> Result<(Nombre, Nombre), ErreurCalcul> {
    match (a.nombre(), b.nombre()) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(ErreurCalcul::type_(format!(
            "opérandes non pris en charge pour {symbole} : '{}' et '{}'",
            a.nom_type(),
            b.nom_type()
        ))),
    }
}

fn reels(x: Nombre, y: Nombre) -> Result<(f64, f64), ErreurCalcul> {
    let f = |n: Nombre| match n {
        Nombre::Entier(i) => entier_vers_reel(&i),
        Nombre::Reel(r) => Ok(r),
    };
    Ok((f(x)?, f(y)?))
}

/// Résultat flottant : NaN né d’opérandes non-NaN => exception flottante.
fn flottant(r: f64, x: f64, y: f64, symbole: &str) -> Result<Valeur, ErreurCalcul> {
    if r.is_nan() && !x.is_nan() && !y.is_nan() {
        return Err(ErreurCalcul::VirguleFlottante(format!(
            "opération invalide : {x} {symbole} {y}"
        )));
    }
    Ok(Valeur::Reel(r))
}

fn est_zero(n: &Nombre) -> bool {
    match n {
        Nombre::Entier(i) => i.is_zero(),
        Nombre::Reel(r) => *r == 0.0,
    }
}

/* ------------------------ Opérations arithmétiques ------------------------ */

pub fn ajouter(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    match paire(a, b, "+")? {
        (Nombre::Entier(x), Nombre::Entier(y)) => Ok(Valeur::Entier(x + y)),
        (x, y) => {
            let (x, y) = reels(x, y)?;
            flottant(x + y, x, y, "+")
        }
    }
}

pub fn soustraire(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    match paire(a, b, "-")? {
        (Nombre::Entier(x), Nombre::Entier(y)) => Ok(Valeur::Entier(x - y)),
        (x, y) => {
            let (x, y) = reels(x, y)?;
            flottant(x - y, x, y, "-")
        }
    }
}

pub fn multiplier(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    match paire(a, b, "*")? {
        (Nombre::Entier(x), Nombre::Entier(y)) => Ok(Valeur::Entier(x * y)),
        (x, y) => {
            let (x, y) = reels(x, y)?;
            flottant(x * y, x, y, "*")
        }
    }
}

/// Division vraie (/).
pub fn diviser(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let (x, y) = paire(a, b, "/")?;
    if est_zero(&y) {
        return Err(ErreurCalcul::division_par_zero("division par zéro"));
    }
    match (x, y) {
        (Nombre::Entier(x), Nombre::Entier(y)) => BigRational::new(x, y)
            .to_f64()
            .filter(|r| r.is_finite())
            .map(Valeur::Reel)
            .ok_or_else(|| {
                ErreurCalcul::debordement("quotient entier trop grand pour un flottant")
            }),
        (x, y) => {
            let (x, y) = reels(x, y)?;
            flottant(x / y, x, y, "/")
        }
    }
}

/// divmod flottant, division plancher (même algorithme que CPython float_divmod).
fn divmod_reel(vx: f64, wx: f64) -> (f64, f64) {
    let mut reste = vx % wx;
    let mut div = (vx - reste) / wx;
    if reste != 0.0 {
        if (wx < 0.0) != (reste < 0.0) {
            reste += wx;
            div -= 1.0;
        }
    } else {
        reste = 0.0_f64.copysign(wx);
    }

    let plancher = if div != 0.0 {
        let mut f = div.floor();
        if div - f > 0.5 {
            f += 1.0;
        }
        f
    } else {
        0.0_f64.copysign(vx / wx)
    };
    (plancher, reste)
}

/// Division plancher (//).
pub fn diviser_entier(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let (x, y) = paire(a, b, "//")?;
    if est_zero(&y) {
        return Err(ErreurCalcul::division_par_zero("division entière par zéro"));
    }
    match (x, y) {
        (Nombre::Entier(x), Nombre::Entier(y)) => Ok(Valeur::Entier(x.div_floor(&y))),
        (x, y) => {
            let (x, y) = reels(x, y)?;
            let (q, _) = divmod_reel(x, y);
            flottant(q, x, y, "//")
        }
    }
}

/// Modulo (%), signe du diviseur.
pub fn modulo(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let (x, y) = paire(a, b, "%")?;
    if est_zero(&y) {
        return Err(ErreurCalcul::division_par_zero("modulo par zéro"));
    }
    match (x, y) {
        (Nombre::Entier(x), Nombre::Entier(y)) => Ok(Valeur::Entier(x.mod_floor(&y))),
        (x, y) => {
            let (x, y) = reels(x, y)?;
            let (_, r) = divmod_reel(x, y);
            flottant(r, x, y, "%")
        }
    }
}

/// Puissance (**). `limites` : garde-fous du mode restreint (None en mode libre).
pub fn puissance(a: &Valeur, b: &Valeur, limites: Option<&Limites>) -> Result<Valeur, ErreurCalcul> {
    let (x, y) = paire(a, b, "**")?;
    if let Some(l) = limites {
        l.verifier_puissance(&x, &y)?;
    }

    match (x, y) {
        (Nombre::Entier(x), Nombre::Entier(y)) => {
            if !y.is_negative() {
                return puissance_entiere(&x, &y);
            }
            // exposant négatif : résultat flottant
            if x.is_zero() {
                return Err(ErreurCalcul::division_par_zero(
                    "0 ne peut pas être élevé à une puissance négative",
                ));
            }
            puissance_reelle(entier_vers_reel(&x)?, entier_vers_reel(&y)?)
        }
        (x, y) => {
            let (x, y) = reels(x, y)?;
            puissance_reelle(x, y)
        }
    }
}

fn puissance_entiere(x: &BigInt, y: &BigInt) -> Result<Valeur, ErreurCalcul> {
    // bases triviales : pas besoin de convertir l’exposant
    if y.is_zero() {
        return Ok(Valeur::entier(1));
    }
    if x.is_zero() || x.is_one() {
        return Ok(Valeur::Entier(x.clone()));
    }
    if *x == BigInt::from(-1) {
        return Ok(Valeur::entier(if y.is_even() { 1 } else { -1 }));
    }

    let n = y
        .to_u32()
        .ok_or_else(|| ErreurCalcul::limite("exposant entier trop grand"))?;
    Ok(Valeur::Entier(x.pow(n)))
}

fn puissance_reelle(x: f64, y: f64) -> Result<Valeur, ErreurCalcul> {
    if y == 0.0 {
        return Ok(Valeur::Reel(1.0));
    }
    if x == 0.0 && y < 0.0 {
        return Err(ErreurCalcul::division_par_zero(
            "0.0 ne peut pas être élevé à une puissance négative",
        ));
    }
    if x < 0.0 && x.is_finite() && y.is_finite() && y.fract() != 0.0 {
        return Err(ErreurCalcul::valeur(
            "base négative et exposant fractionnaire : résultat complexe non pris en charge",
        ));
    }

    let r = x.powf(y);
    if r.is_infinite() && x.is_finite() && y.is_finite() {
        return Err(ErreurCalcul::debordement("puissance hors des limites flottantes"));
    }
    Ok(Valeur::Reel(r))
}

/* ------------------------ Opérations binaires sur bits ------------------------ */

fn entiers_bits(a: &Valeur, b: &Valeur, symbole: &str) -> Result<(BigInt, BigInt), ErreurCalcul> {
    match (a, b) {
        (Valeur::Booleen(_) | Valeur::Entier(_), Valeur::Booleen(_) | Valeur::Entier(_)) => {
            Ok((a.vers_entier(symbole)?, b.vers_entier(symbole)?))
        }
        _ => Err(ErreurCalcul::type_(format!(
            "opérandes non pris en charge pour {symbole} : '{}' et '{}'",
            a.nom_type(),
            b.nom_type()
        ))),
    }
}

fn bits(a: &Valeur, b: &Valeur, op: OpBinaire) -> Result<Valeur, ErreurCalcul> {
    // bool ○ bool reste booléen
    if let (Valeur::Booleen(x), Valeur::Booleen(y)) = (a, b) {
        let r = match op {
            OpBinaire::EtBits => x & y,
            OpBinaire::OuBits => x | y,
            _ => x ^ y,
        };
        return Ok(Valeur::Booleen(r));
    }

    let (x, y) = entiers_bits(a, b, op.symbole())?;
    let r = match op {
        OpBinaire::EtBits => x & y,
        OpBinaire::OuBits => x | y,
        _ => x ^ y,
    };
    Ok(Valeur::Entier(r))
}

fn decaler(a: &Valeur, b: &Valeur, gauche: bool) -> Result<Valeur, ErreurCalcul> {
    let symbole = if gauche { "<<" } else { ">>" };
    let (x, n) = entiers_bits(a, b, symbole)?;
    if n.is_negative() {
        return Err(ErreurCalcul::valeur("nombre de décalages négatif"));
    }

    if gauche {
        if x.is_zero() {
            return Ok(Valeur::entier(0));
        }
        let n = n
            .to_usize()
            .ok_or_else(|| ErreurCalcul::limite("décalage trop grand"))?;
        return Ok(Valeur::Entier(x << n));
    }

    // à droite : au-delà de la taille, il ne reste que le signe
    match n.to_u64().filter(|k| *k <= x.bits()) {
        Some(k) => Ok(Valeur::Entier(x >> k as usize)),
        None => Ok(Valeur::entier(if x.is_negative() { -1 } else { 0 })),
    }
}

/* ------------------------ Comparaisons ------------------------ */

fn ordonner(a: &Valeur, b: &Valeur, symbole: &str) -> Result<Option<Ordering>, ErreurCalcul> {
    match paire(a, b, symbole)? {
        (Nombre::Entier(x), Nombre::Entier(y)) => Ok(Some(x.cmp(&y))),
        (Nombre::Entier(x), Nombre::Reel(y)) => Ok(ordonner_entier_reel(&x, y)),
        (Nombre::Reel(x), Nombre::Entier(y)) => {
            Ok(ordonner_entier_reel(&y, x).map(Ordering::reverse))
        }
        (Nombre::Reel(x), Nombre::Reel(y)) => Ok(x.partial_cmp(&y)),
    }
}

/// Entier face à flottant, sans arrondir l’entier (2**53+1 != 2.0**53).
fn ordonner_entier_reel(i: &BigInt, r: f64) -> Option<Ordering> {
    if r.is_nan() {
        return None;
    }
    if r.is_infinite() {
        return Some(if r > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }
    let r = BigRational::from_float(r)?;
    Some(BigRational::from_integer(i.clone()).cmp(&r))
}

fn egal(a: &Valeur, b: &Valeur) -> bool {
    match (a, b) {
        (Valeur::Tuple(x), Valeur::Tuple(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(u, v)| egal(u, v))
        }
        (Valeur::Tuple(_), _) | (_, Valeur::Tuple(_)) => false,
        _ => matches!(ordonner(a, b, "=="), Ok(Some(Ordering::Equal))),
    }
}

fn comparer(op: OpBinaire, a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let r = match op {
        OpBinaire::Egal => egal(a, b),
        OpBinaire::Different => !egal(a, b),
        _ => {
            let ord = ordonner(a, b, op.symbole())?;
            match (op, ord) {
                (_, None) => false,
                (OpBinaire::Inferieur, Some(o)) => o == Ordering::Less,
                (OpBinaire::InferieurEgal, Some(o)) => o != Ordering::Greater,
                (OpBinaire::Superieur, Some(o)) => o == Ordering::Greater,
                (_, Some(o)) => o != Ordering::Less,
            }
        }
    };
    Ok(Valeur::Booleen(r))
}

/* ------------------------ Dispatch ------------------------ */

/// Opération binaire (hors `and` / `or`, évalués paresseusement par eval.rs).
pub fn operation_binaire(
    op: OpBinaire,
    a: &Valeur,
    b: &Valeur,
    limites: Option<&Limites>,
) -> Result<Valeur, ErreurCalcul> {
    use OpBinaire::*;
    match op {
        Plus => ajouter(a, b),
        Moins => soustraire(a, b),
        Fois => multiplier(a, b),
        Divise => diviser(a, b),
        DiviseEntier => diviser_entier(a, b),
        Modulo => modulo(a, b),
        Puissance => puissance(a, b, limites),
        EtBits | OuBits | XorBits => bits(a, b, op),
        DecalageGauche => decaler(a, b, true),
        DecalageDroite => decaler(a, b, false),
        Egal | Different | Inferieur | InferieurEgal | Superieur | SuperieurEgal => {
            comparer(op, a, b)
        }
        Et | Ou => Err(ErreurCalcul::syntaxe(format!(
            "'{}' doit être évalué paresseusement",
            op.symbole()
        ))),
    }
}

pub fn operation_unaire(op: OpUnaire, v: &Valeur) -> Result<Valeur, ErreurCalcul> {
    if op == OpUnaire::Non {
        return Ok(Valeur::Booleen(!v.est_vrai()));
    }

    let n = v.nombre().ok_or_else(|| {
        ErreurCalcul::type_(format!(
            "opérande non pris en charge pour {} unaire : '{}'",
            op.symbole(),
            v.nom_type()
        ))
    })?;

    match (op, n) {
        (OpUnaire::Moins, Nombre::Entier(x)) => Ok(Valeur::Entier(-x)),
        (OpUnaire::Moins, Nombre::Reel(x)) => Ok(Valeur::Reel(-x)),
        (OpUnaire::Plus, Nombre::Entier(x)) => Ok(Valeur::Entier(x)),
        (OpUnaire::Plus, Nombre::Reel(x)) => Ok(Valeur::Reel(x)),
        (OpUnaire::Inverse, Nombre::Entier(x)) => Ok(Valeur::Entier(-(x + BigInt::one()))),
        (_, _) => Err(ErreurCalcul::type_(format!(
            "opérande non pris en charge pour {} unaire : '{}'",
            op.symbole(),
            v.nom_type()
        ))),
    }
}
