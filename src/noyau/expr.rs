// src/noyau/expr.rs
//
// AST d’une expression.
// - Const   : littéral numérique
// - Nom     : nom nu (résolu à l’évaluation : constantes du mode libre)
// - Appel   : appel de fonction, arguments positionnels seulement
// - Tuple   : `a, b` ou `(a, b)` ; interdit en mode restreint
//
// Précédences (du plus faible au plus fort), comme Python :
//   or < and < not < comparaisons < | < ^ < & < << >> < + - < * / // % < unaires < **

use std::fmt;

use super::valeur::Valeur;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpUnaire {
    Moins,
    Plus,
    Inverse, // ~
    Non,     // not
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpBinaire {
    Ou,
    Et,

    Egal,
    Different,
    Inferieur,
    InferieurEgal,
    Superieur,
    SuperieurEgal,

    OuBits,
    XorBits,
    EtBits,
    DecalageGauche,
    DecalageDroite,

    Plus,
    Moins,
    Fois,
    Divise,
    DiviseEntier,
    Modulo,

    Puissance,
}

impl OpUnaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpUnaire::Moins => "-",
            OpUnaire::Plus => "+",
            OpUnaire::Inverse => "~",
            OpUnaire::Non => "not",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            OpUnaire::Non => 3,
            _ => 11,
        }
    }

    /// Autorisé en mode restreint.
    pub fn est_arithmetique(self) -> bool {
        matches!(self, OpUnaire::Moins | OpUnaire::Plus)
    }
}

impl OpBinaire {
    pub fn symbole(self) -> &'static str {
        use OpBinaire::*;
        match self {
            Ou => "or",
            Et => "and",
            Egal => "==",
            Different => "!=",
            Inferieur => "<",
            InferieurEgal => "<=",
            Superieur => ">",
            SuperieurEgal => ">=",
            OuBits => "|",
            XorBits => "^",
            EtBits => "&",
            DecalageGauche => "<<",
            DecalageDroite => ">>",
            Plus => "+",
            Moins => "-",
            Fois => "*",
            Divise => "/",
            DiviseEntier => "//",
            Modulo => "%",
            Puissance => "**",
        }
    }

    pub fn precedence(self) -> u8 {
        use OpBinaire::*;
        match self {
            Ou => 1,
            Et => 2,
            Egal | Different | Inferieur | InferieurEgal | Superieur | SuperieurEgal => 4,
            OuBits => 5,
            XorBits => 6,
            EtBits => 7,
            DecalageGauche | DecalageDroite => 8,
            Plus | Moins => 9,
            Fois | Divise | DiviseEntier | Modulo => 10,
            Puissance => 12,
        }
    }

    pub fn associatif_droite(self) -> bool {
        self == OpBinaire::Puissance
    }

    pub fn est_comparaison(self) -> bool {
        self.precedence() == 4
    }

    /// Autorisé en mode restreint : + - * / // % **
    pub fn est_arithmetique(self) -> bool {
        use OpBinaire::*;
        matches!(
            self,
            Plus | Moins | Fois | Divise | DiviseEntier | Modulo | Puissance
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Const(Valeur),
    Nom(String),

    Unaire(OpUnaire, Box<Expr>),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),

    Appel(String, Vec<Expr>),
    Tuple(Vec<Expr>),
}

/* ------------------------ Affichage (journal) ------------------------ */

fn ecrire_liste(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (k, e) in items.iter().enumerate() {
        if k > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{e}")?;
    }
    Ok(())
}

/// Forme entièrement parenthésée : lève toute ambiguïté de précédence.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(Valeur::Entier(n)) => write!(f, "{n}"),
            Expr::Const(Valeur::Reel(x)) => write!(f, "{x:?}"),
            Expr::Const(v) => write!(f, "{v:?}"),
            Expr::Nom(nom) => write!(f, "{nom}"),

            Expr::Unaire(OpUnaire::Non, x) => write!(f, "(not {x})"),
            Expr::Unaire(op, x) => write!(f, "({}{x})", op.symbole()),
            Expr::Binaire(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),

            Expr::Appel(nom, args) => {
                write!(f, "{nom}(")?;
                ecrire_liste(f, args)?;
                write!(f, ")")
            }
            Expr::Tuple(items) => {
                write!(f, "(")?;
                ecrire_liste(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}
