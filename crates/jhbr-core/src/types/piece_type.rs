//! Piece kinds, independent of owner.

/// Piece kind. The discriminants are the low bits of the packed [`Piece`](super::Piece)
/// code, so `Bishop`/`Horse` share the tag `0b101` and `Rook`/`Dragon` share `0b110`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceType {
    Pawn = 1,
    Lance = 2,
    Knight = 3,
    Silver = 4,
    Bishop = 5,
    Rook = 6,
    Gold = 7,
    King = 8,
    ProPawn = 9,
    ProLance = 10,
    ProKnight = 11,
    ProSilver = 12,
    Horse = 13,
    Dragon = 14,
}

impl PieceType {
    pub const NUM: usize = 14;

    /// Kinds that can be held in hand, in SFEN/hand order.
    pub const HAND_PIECES: [PieceType; 7] = [
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Gold,
        PieceType::Silver,
        PieceType::Knight,
        PieceType::Lance,
        PieceType::Pawn,
    ];

    pub const fn from_u8(n: u8) -> Option<PieceType> {
        Some(match n {
            1 => PieceType::Pawn,
            2 => PieceType::Lance,
            3 => PieceType::Knight,
            4 => PieceType::Silver,
            5 => PieceType::Bishop,
            6 => PieceType::Rook,
            7 => PieceType::Gold,
            8 => PieceType::King,
            9 => PieceType::ProPawn,
            10 => PieceType::ProLance,
            11 => PieceType::ProKnight,
            12 => PieceType::ProSilver,
            13 => PieceType::Horse,
            14 => PieceType::Dragon,
            _ => return None,
        })
    }

    #[inline]
    pub const fn can_promote(self) -> bool {
        matches!(
            self,
            PieceType::Pawn
                | PieceType::Lance
                | PieceType::Knight
                | PieceType::Silver
                | PieceType::Bishop
                | PieceType::Rook
        )
    }

    pub const fn promote(self) -> Option<PieceType> {
        match self {
            PieceType::Pawn => Some(PieceType::ProPawn),
            PieceType::Lance => Some(PieceType::ProLance),
            PieceType::Knight => Some(PieceType::ProKnight),
            PieceType::Silver => Some(PieceType::ProSilver),
            PieceType::Bishop => Some(PieceType::Horse),
            PieceType::Rook => Some(PieceType::Dragon),
            _ => None,
        }
    }

    pub const fn unpromote(self) -> PieceType {
        match self {
            PieceType::ProPawn => PieceType::Pawn,
            PieceType::ProLance => PieceType::Lance,
            PieceType::ProKnight => PieceType::Knight,
            PieceType::ProSilver => PieceType::Silver,
            PieceType::Horse => PieceType::Bishop,
            PieceType::Dragon => PieceType::Rook,
            _ => self,
        }
    }

    #[inline]
    pub const fn is_promoted(self) -> bool {
        self as u8 >= PieceType::ProPawn as u8
    }

    /// Bishop, rook and their promotions: the "major" pieces worth 5 points
    /// in entering-king declarations.
    #[inline]
    pub const fn is_major(self) -> bool {
        matches!(
            self,
            PieceType::Bishop | PieceType::Rook | PieceType::Horse | PieceType::Dragon
        )
    }

    /// Uppercase SFEN letter of the unpromoted kind.
    pub const fn sfen_char(self) -> char {
        match self.unpromote() {
            PieceType::Pawn => 'P',
            PieceType::Lance => 'L',
            PieceType::Knight => 'N',
            PieceType::Silver => 'S',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Gold => 'G',
            _ => 'K',
        }
    }

    pub const fn from_sfen_char(c: char) -> Option<PieceType> {
        Some(match c.to_ascii_uppercase() {
            'P' => PieceType::Pawn,
            'L' => PieceType::Lance,
            'N' => PieceType::Knight,
            'S' => PieceType::Silver,
            'B' => PieceType::Bishop,
            'R' => PieceType::Rook,
            'G' => PieceType::Gold,
            'K' => PieceType::King,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promote_then_unpromote_is_identity() {
        for n in 1..=14 {
            let pt = PieceType::from_u8(n).unwrap();
            if let Some(promoted) = pt.promote() {
                assert!(promoted.is_promoted());
                assert_eq!(promoted.unpromote(), pt);
            }
        }
        assert_eq!(PieceType::Gold.promote(), None);
        assert_eq!(PieceType::King.promote(), None);
    }

    #[test]
    fn type_tag_groups_bishops_and_rooks() {
        assert_eq!(PieceType::Bishop as u8 & 0b111, 0b101);
        assert_eq!(PieceType::Horse as u8 & 0b111, 0b101);
        assert_eq!(PieceType::Rook as u8 & 0b111, 0b110);
        assert_eq!(PieceType::Dragon as u8 & 0b111, 0b110);
    }

    #[test]
    fn from_u8_range() {
        assert_eq!(PieceType::from_u8(0), None);
        assert_eq!(PieceType::from_u8(14), Some(PieceType::Dragon));
        assert_eq!(PieceType::from_u8(15), None);
    }
}
