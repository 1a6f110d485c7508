// src/noyau/jetons.rs

use num_bigint::BigInt;

use super::erreurs::ErreurCalcul;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Entier(BigInt),
    Reel(f64),

    // Noms (fonctions, constantes, mémoire). Sensible à la casse.
    // NOTE: le parse décidera si c’est un appel (suivi de '(') ou un nom nu.
    Ident(String),

    // Mots-clés logiques
    Et,
    Ou,
    Non,

    Plus,
    Moins,
    Etoile,
    DoubleEtoile, // **
    Barre,
    DoubleBarre, // //
    Pourcent,
    Esperluette,
    Pipe,
    Chapeau, // ^ (xor, pas puissance)
    Tilde,
    DecalageGauche,
    DecalageDroite,

    Egal,
    Different,
    Inferieur,
    InferieurEgal,
    Superieur,
    SuperieurEgal,

    LPar,
    RPar,
    Virgule,

    // Reconnus pour être refusés proprement par le parse
    Point,
    Affectation,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers décimaux (ex: 12, 1_000) et préfixés 0x / 0o / 0b
/// - flottants (ex: 1.5, .5, 5., 1e-3, 2.5E+10)
/// - identifiants Unicode [lettre_][lettre chiffre _]*  (and/or/not => mots-clés)
/// - opérateurs + - * ** / // % & | ^ ~ << >> == != < <= > >=
/// - parenthèses ( ) et virgule
///
/// Un littéral mal formé (ex: 08, 1__0, 0x, 2x) => erreur de valeur.
/// Tout autre caractère => erreur de syntaxe.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombres (y compris ".5")
        if c.is_ascii_digit()
            || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()))
        {
            let (tok, suivant) = lire_nombre(&chars, i)?;
            out.push(tok);
            i = suivant;
            continue;
        }

        // Identifiants / mots-clés
        if c.is_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            out.push(match mot.as_str() {
                "and" => Tok::Et,
                "or" => Tok::Ou,
                "not" => Tok::Non,
                _ => Tok::Ident(mot),
            });
            continue;
        }

        // Opérateurs (deux caractères d’abord)
        let (tok, largeur) = match (c, chars.get(i + 1).copied()) {
            ('*', Some('*')) => (Tok::DoubleEtoile, 2),
            ('/', Some('/')) => (Tok::DoubleBarre, 2),
            ('<', Some('<')) => (Tok::DecalageGauche, 2),
            ('>', Some('>')) => (Tok::DecalageDroite, 2),
            ('<', Some('=')) => (Tok::InferieurEgal, 2),
            ('>', Some('=')) => (Tok::SuperieurEgal, 2),
            ('=', Some('=')) => (Tok::Egal, 2),
            ('!', Some('=')) => (Tok::Different, 2),

            ('+', _) => (Tok::Plus, 1),
            ('-', _) => (Tok::Moins, 1),
            ('*', _) => (Tok::Etoile, 1),
            ('/', _) => (Tok::Barre, 1),
            ('%', _) => (Tok::Pourcent, 1),
            ('&', _) => (Tok::Esperluette, 1),
            ('|', _) => (Tok::Pipe, 1),
            ('^', _) => (Tok::Chapeau, 1),
            ('~', _) => (Tok::Tilde, 1),
            ('<', _) => (Tok::Inferieur, 1),
            ('>', _) => (Tok::Superieur, 1),
            ('=', _) => (Tok::Affectation, 1),
            ('(', _) => (Tok::LPar, 1),
            (')', _) => (Tok::RPar, 1),
            (',', _) => (Tok::Virgule, 1),
            ('.', _) => (Tok::Point, 1),

            _ => return Err(ErreurCalcul::syntaxe(format!("caractère inattendu : '{c}'"))),
        };
        out.push(tok);
        i += largeur;
    }

    Ok(out)
}

/* ------------------------ Littéraux numériques ------------------------ */

fn base_prefixe(p: char) -> Option<u32> {
    match p {
        'x' | 'X' => Some(16),
        'o' | 'O' => Some(8),
        'b' | 'B' => Some(2),
        _ => None,
    }
}

/// Soulignés : uniquement entre deux chiffres (pas en tête / fin, pas doublés).
fn soulignes_valides(groupe: &str, tete_permise: bool) -> bool {
    !groupe.is_empty()
        && !groupe.ends_with('_')
        && !groupe.contains("__")
        && (tete_permise || !groupe.starts_with('_'))
}

fn malforme(chars: &[char], debut: usize, fin: usize) -> ErreurCalcul {
    let brut: String = chars[debut..fin].iter().collect();
    ErreurCalcul::valeur(format!("littéral numérique invalide : {brut}"))
}

/// Lit un littéral à partir de `debut`. Retourne (jeton, index suivant).
fn lire_nombre(chars: &[char], debut: usize) -> Result<(Tok, usize), ErreurCalcul> {
    let n = chars.len();
    let colle = |k: usize| k < n && (chars[k].is_alphanumeric() || chars[k] == '_');

    // 0x.. / 0o.. / 0b..
    if chars[debut] == '0' {
        if let Some(base) = chars.get(debut + 1).copied().and_then(base_prefixe) {
            let mut i = debut + 2;
            while colle(i) {
                i += 1;
            }
            let corps: String = chars[debut + 2..i].iter().collect();
            let valeur = soulignes_valides(&corps, true)
                .then(|| BigInt::parse_bytes(corps.replace('_', "").as_bytes(), base))
                .flatten()
                .ok_or_else(|| malforme(chars, debut, i))?;
            return Ok((Tok::Entier(valeur), i));
        }
    }

    let chiffres = |mut k: usize| {
        while k < n && (chars[k].is_ascii_digit() || chars[k] == '_') {
            k += 1;
        }
        k
    };

    let mut i = chiffres(debut);
    let mut groupes = vec![(debut, i)];
    let mut reel = false;

    if i < n && chars[i] == '.' {
        reel = true;
        let d = i + 1;
        i = chiffres(d);
        groupes.push((d, i));
    }

    if i < n && (chars[i] == 'e' || chars[i] == 'E') {
        reel = true;
        let mut d = i + 1;
        if d < n && (chars[d] == '+' || chars[d] == '-') {
            d += 1;
        }
        i = chiffres(d);
        // l’exposant doit avoir au moins un chiffre
        if i == d {
            while colle(i) {
                i += 1;
            }
            return Err(malforme(chars, debut, i));
        }
        groupes.push((d, i));
    }

    // collé à un identifiant : "2x", "1j", "3if"
    if colle(i) {
        while colle(i) {
            i += 1;
        }
        return Err(malforme(chars, debut, i));
    }

    for (a, b) in groupes {
        let g: String = chars[a..b].iter().collect();
        if !g.is_empty() && !soulignes_valides(&g, false) {
            return Err(malforme(chars, debut, i));
        }
    }

    let brut: String = chars[debut..i].iter().filter(|c| **c != '_').collect();

    if reel {
        let x = brut.parse::<f64>().map_err(|_| malforme(chars, debut, i))?;
        return Ok((Tok::Reel(x), i));
    }

    // "007" interdit, "000" accepté
    if brut.len() > 1 && brut.starts_with('0') && brut.chars().any(|c| c != '0') {
        return Err(malforme(chars, debut, i));
    }
    let valeur = BigInt::parse_bytes(brut.as_bytes(), 10).ok_or_else(|| malforme(chars, debut, i))?;
    Ok((Tok::Entier(valeur), i))
}

/* ------------------------ Mode restreint ------------------------ */

/// Mode restreint : `m`, `pi`, `e` écrits seuls deviennent des appels sans argument.
/// Substitution au niveau des jetons : "mean" ou "e1" ne sont jamais touchés.
pub fn substituer_constantes(jetons: Vec<Tok>) -> Vec<Tok> {
    let mut out = Vec::with_capacity(jetons.len() + 4);
    let mut iter = jetons.into_iter().peekable();

    while let Some(t) = iter.next() {
        let nu = matches!(&t, Tok::Ident(nom) if matches!(nom.as_str(), "m" | "pi" | "e"))
            && !matches!(iter.peek(), Some(Tok::LPar));
        out.push(t);
        if nu {
            out.push(Tok::LPar);
            out.push(Tok::RPar);
        }
    }

    out
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens.iter().map(symbole).collect::<Vec<_>>().join(" ")
}

pub fn symbole(t: &Tok) -> String {
    let s = match t {
        Tok::Entier(n) => return n.to_string(),
        Tok::Reel(x) => return format!("{x:?}"),
        Tok::Ident(nom) => return nom.clone(),

        Tok::Et => "and",
        Tok::Ou => "or",
        Tok::Non => "not",
        Tok::Plus => "+",
        Tok::Moins => "-",
        Tok::Etoile => "*",
        Tok::DoubleEtoile => "**",
        Tok::Barre => "/",
        Tok::DoubleBarre => "//",
        Tok::Pourcent => "%",
        Tok::Esperluette => "&",
        Tok::Pipe => "|",
        Tok::Chapeau => "^",
        Tok::Tilde => "~",
        Tok::DecalageGauche => "<<",
        Tok::DecalageDroite => ">>",
        Tok::Egal => "==",
        Tok::Different => "!=",
        Tok::Inferieur => "<",
        Tok::InferieurEgal => "<=",
        Tok::Superieur => ">",
        Tok::SuperieurEgal => ">=",
        Tok::LPar => "(",
        Tok::RPar => ")",
        Tok::Virgule => ",",
        Tok::Point => ".",
        Tok::Affectation => "=",
    };
    s.to_string()
}
