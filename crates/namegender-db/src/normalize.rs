//! Rewrite the table's bracketed diacritic tokens (`<s,>`, `<C^>`, `<SCH>`, ...)
//! into single Unicode code points.

use std::borrow::Cow;

/// Code point and the literal tokens that denote it, applied in this order.
const LEGACY_TOKENS: &[(char, &[&str])] = &[
    ('\u{0100}', &["<A/>"]),
    ('\u{0101}', &["<a/>"]),
    ('\u{0102}', &["<Â>"]),
    ('\u{0103}', &["<â>"]),
    ('\u{0104}', &["<A,>"]),
    ('\u{0105}', &["<a,>"]),
    ('\u{0106}', &["<C´>"]),
    ('\u{0107}', &["<c´>"]),
    ('\u{010C}', &["<C^>", "<CH>"]),
    ('\u{010D}', &["<c^>", "<ch>"]),
    ('\u{010F}', &["<d´>"]),
    ('\u{0110}', &["<Ð>", "<DJ>"]),
    ('\u{0111}', &["<ð>", "<dj>"]),
    ('\u{0112}', &["<E/>"]),
    ('\u{0113}', &["<e/>"]),
    ('\u{0116}', &["<E°>"]),
    ('\u{0117}', &["<e°>"]),
    ('\u{0118}', &["<E,>"]),
    ('\u{0119}', &["<e,>"]),
    ('\u{011A}', &["<Ê>"]),
    ('\u{011B}', &["<ê>"]),
    ('\u{011F}', &["<g^>"]),
    ('\u{0122}', &["<G,>"]),
    ('\u{011E}', &["<G^>"]),
    ('\u{0123}', &["<g´>"]),
    ('\u{012A}', &["<I/>"]),
    ('\u{012B}', &["<i/>"]),
    ('\u{0130}', &["<I°>"]),
    ('\u{0131}', &["<i>"]),
    ('\u{0132}', &["<IJ>"]),
    ('\u{0133}', &["<ij>"]),
    ('\u{0136}', &["<K,>"]),
    ('\u{0137}', &["<k,>"]),
    ('\u{013B}', &["<L,>"]),
    ('\u{013C}', &["<l,>"]),
    ('\u{013D}', &["<L´>"]),
    ('\u{013E}', &["<l´>"]),
    ('\u{0141}', &["<L/>"]),
    ('\u{0142}', &["<l/>"]),
    ('\u{0145}', &["<N,>"]),
    ('\u{0146}', &["<n,>"]),
    ('\u{0147}', &["<N^>"]),
    ('\u{0148}', &["<n^>"]),
    ('\u{0150}', &["<Ö>"]),
    ('\u{0151}', &["<ö>"]),
    ('\u{0152}', &["<OE>"]),
    ('\u{0153}', &["<oe>"]),
    ('\u{0158}', &["<R^>"]),
    ('\u{0159}', &["<r^>"]),
    ('\u{015E}', &["<S,>"]),
    ('\u{015F}', &["<s,>"]),
    ('\u{0160}', &["<S^>", "<SCH>", "<SH>"]),
    ('\u{0161}', &["<s^>", "<sch>", "<sh>"]),
    ('\u{0162}', &["<T,>"]),
    ('\u{0163}', &["<t,>"]),
    ('\u{0165}', &["<t´>"]),
    ('\u{016A}', &["<U/>"]),
    ('\u{016B}', &["<u/>"]),
    ('\u{016E}', &["<U°>"]),
    ('\u{016F}', &["<u°>"]),
    ('\u{0172}', &["<U,>"]),
    ('\u{0173}', &["<u,>"]),
    ('\u{017B}', &["<Z°>"]),
    ('\u{017C}', &["<z°>"]),
    ('\u{017D}', &["<Z^>"]),
    ('\u{017E}', &["<z^>"]),
    ('\u{1E9E}', &["<ß>"]),
];

/// Replace every legacy token with the code point it denotes.
///
/// Text without a `<` is returned borrowed. Replacement characters never occur
/// inside a token, so the result is stable under repeated normalization.
pub fn normalize(raw: &str) -> Cow<'_, str> {
    if !raw.contains('<') {
        return Cow::Borrowed(raw);
    }

    let mut out = raw.to_string();
    let mut buf = [0u8; 4];
    for (ch, tokens) in LEGACY_TOKENS {
        let replacement: &str = ch.encode_utf8(&mut buf);
        for token in *tokens {
            if out.contains(token) {
                out = out.replace(token, replacement);
            }
        }
        if !out.contains('<') {
            break;
        }
    }
    Cow::Owned(out)
}
