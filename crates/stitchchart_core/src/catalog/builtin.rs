//! Default stitch symbol table.

use crate::model::symbol::{Symbol, SymbolCategory, SymbolId};
use once_cell::sync::Lazy;
use std::sync::Arc;

pub const KNIT: SymbolId = SymbolId(1);
pub const PURL: SymbolId = SymbolId(2);
pub const SLIP: SymbolId = SymbolId(3);
pub const NO_STITCH: SymbolId = SymbolId(4);
pub const K2TOG: SymbolId = SymbolId(10);
pub const SSK: SymbolId = SymbolId(11);
pub const P2TOG: SymbolId = SymbolId(12);
pub const SK2P: SymbolId = SymbolId(13);
pub const YARN_OVER: SymbolId = SymbolId(20);
pub const M1L: SymbolId = SymbolId(21);
pub const M1R: SymbolId = SymbolId(22);
pub const KFB: SymbolId = SymbolId(23);
pub const C4F: SymbolId = SymbolId(30);
pub const C4B: SymbolId = SymbolId(31);
pub const C6F: SymbolId = SymbolId(32);
pub const C6B: SymbolId = SymbolId(33);
pub const BOBBLE: SymbolId = SymbolId(40);
pub const TWISTED_KNIT: SymbolId = SymbolId(41);

static EMPTY_SYMBOL: Lazy<Arc<Symbol>> = Lazy::new(|| {
    Arc::new(
        Symbol::new(
            SymbolId::EMPTY,
            SymbolCategory::Basic,
            "□",
            "Empty",
            "",
            "Background square with no stitch instruction",
        )
        .with_ascii(" "),
    )
});

/// Shared background placeholder used for unset cells.
pub fn empty_symbol() -> Arc<Symbol> {
    Arc::clone(&EMPTY_SYMBOL)
}

/// Returns the default symbol table in palette order.
pub(crate) fn builtin_symbols() -> Vec<Arc<Symbol>> {
    use SymbolCategory::{Basic, Cables, Decreases, Increases, Special};

    let mut symbols = vec![empty_symbol()];
    symbols.extend(
        [
            Symbol::new(
                KNIT,
                Basic,
                "│",
                "Knit",
                "K",
                "Knit stitch on RS, purl on WS",
            )
            .with_ascii("|"),
            Symbol::new(
                PURL,
                Basic,
                "—",
                "Purl",
                "P",
                "Purl stitch on RS, knit on WS",
            )
            .with_ascii("-"),
            Symbol::new(SLIP, Basic, "V", "Slip", "Sl", "Slip stitch purlwise"),
            Symbol::new(
                NO_STITCH,
                Basic,
                "▓",
                "No stitch",
                "",
                "Placeholder where no stitch exists",
            )
            .with_ascii("#"),
            Symbol::new(
                K2TOG,
                Decreases,
                "/",
                "K2tog",
                "K2tog",
                "Knit two together, right-leaning decrease",
            ),
            Symbol::new(
                SSK,
                Decreases,
                "\\",
                "SSK",
                "SSK",
                "Slip, slip, knit, left-leaning decrease",
            ),
            Symbol::new(P2TOG, Decreases, "⁄", "P2tog", "P2tog", "Purl two together")
                .with_ascii("p/"),
            Symbol::new(
                SK2P,
                Decreases,
                "Λ",
                "SK2P",
                "SK2P",
                "Slip one, knit two together, pass slipped stitch over",
            )
            .with_ascii("^"),
            Symbol::new(
                YARN_OVER,
                Increases,
                "○",
                "Yarn Over",
                "YO",
                "Wrap yarn over needle to add a stitch",
            )
            .with_ascii("o"),
            Symbol::new(
                M1L,
                Increases,
                "ᴍʟ",
                "Make 1 Left",
                "M1L",
                "Left-leaning lifted increase",
            )
            .with_ascii("ML"),
            Symbol::new(
                M1R,
                Increases,
                "ᴍʀ",
                "Make 1 Right",
                "M1R",
                "Right-leaning lifted increase",
            )
            .with_ascii("MR"),
            Symbol::new(
                KFB,
                Increases,
                "Ɣ",
                "Knit Front and Back",
                "KFB",
                "Knit into front and back of stitch",
            )
            .with_ascii("Y"),
            Symbol::new(
                C4F,
                Cables,
                "⋊4",
                "Cable 4 Front",
                "C4F",
                "Slip 2 to cable needle, hold in front, k2, k2 from cable needle",
            )
            .with_ascii("C4F"),
            Symbol::new(
                C4B,
                Cables,
                "⋉4",
                "Cable 4 Back",
                "C4B",
                "Slip 2 to cable needle, hold in back, k2, k2 from cable needle",
            )
            .with_ascii("C4B"),
            Symbol::new(
                C6F,
                Cables,
                "⋊6",
                "Cable 6 Front",
                "C6F",
                "Slip 3 to cable needle, hold in front, k3, k3 from cable needle",
            )
            .with_ascii("C6F"),
            Symbol::new(
                C6B,
                Cables,
                "⋉6",
                "Cable 6 Back",
                "C6B",
                "Slip 3 to cable needle, hold in back, k3, k3 from cable needle",
            )
            .with_ascii("C6B"),
            Symbol::new(BOBBLE, Special, "●", "Bobble", "MB", "Make bobble")
                .with_ascii("@"),
            Symbol::new(
                TWISTED_KNIT,
                Special,
                "ℓ",
                "Knit Through Back Loop",
                "K tbl",
                "Knit through the back loop for a twisted stitch",
            )
            .with_ascii("Q"),
        ]
        .into_iter()
        .map(Arc::new),
    );
    symbols
}
