//! Static control word tables.
//!
//! - [`DESTINATIONS`]: control words that open a destination whose content is
//!   never part of the document text (font table, header/footer, fields'
//!   instructions, embedded objects, math markup...).
//! - [`SPECIAL_CHARACTERS`]: control words that stand for a fixed piece of text.

use phf::{phf_map, phf_set};

/// Destination control words. Text inside a group opened by one of these is
/// dropped, along with every nested group.
pub static DESTINATIONS: phf::Set<&'static str> = phf_set! {
    "aftncn", "aftnsep", "aftnsepc", "annotation", "atnauthor", "atndate", "atnicn", "atnid",
    "atnparent", "atnref", "atntime", "atrfend", "atrfstart", "author", "background",
    "bkmkend", "bkmkstart", "blipuid", "buptim", "category", "colorschememapping",
    "colortbl", "comment", "company", "creatim", "datafield", "datastore", "defchp", "defpap",
    "do", "doccomm", "docvar", "dptxbxtext", "ebcend", "ebcstart", "factoidname", "falt",
    "fchars", "ffdeftext", "ffentrymcr", "ffexitmcr", "ffformat", "ffhelptext", "ffl",
    "ffname", "ffstattext", "field", "file", "filetbl", "fldinst", "fldrslt", "fldtype",
    "fname", "fontemb", "fontfile", "fonttbl", "footer", "footerf", "footerl", "footerr",
    "footnote", "formfield", "ftncn", "ftnsep", "ftnsepc", "g", "generator", "gridtbl",
    "header", "headerf", "headerl", "headerr", "hl", "hlfr", "hlinkbase", "hlloc", "hlsrc",
    "hsv", "htmltag", "info", "keycode", "keywords", "latentstyles", "lchars", "levelnumbers",
    "leveltext", "lfolevel", "linkval", "list", "listlevel", "listname", "listoverride",
    "listoverridetable", "listpicture", "liststylename", "listtable", "listtext",
    "lsdlockedexcept", "macc", "maccPr", "mailmerge", "maln", "malnScr", "manager", "margPr",
    "mbar", "mbarPr", "mbaseJc", "mbegChr", "mborderBox", "mborderBoxPr", "mbox", "mboxPr",
    "mchr", "mcount", "mctrlPr", "md", "mdeg", "mdegHide", "mden", "mdiff", "mdPr", "me",
    "mendChr", "meqArr", "meqArrPr", "mf", "mfName", "mfPr", "mfunc", "mfuncPr", "mgroupChr",
    "mgroupChrPr", "mgrow", "mhideBot", "mhideLeft", "mhideRight", "mhideTop", "mhtmltag",
    "mlim", "mlimloc", "mlimlow", "mlimlowPr", "mlimupp", "mlimuppPr", "mm", "mmaddfieldname",
    "mmath", "mmathPict", "mmathPr", "mmaxdist", "mmc", "mmcJc", "mmconnectstr",
    "mmconnectstrdata", "mmcPr", "mmcs", "mmdatasource", "mmheadersource", "mmmailsubject",
    "mmodso", "mmodsofilter", "mmodsofldmpdata", "mmodsomappedname", "mmodsoname",
    "mmodsorecipdata", "mmodsosort", "mmodsosrc", "mmodsotable", "mmodsoudl",
    "mmodsoudldata", "mmodsouniquetag", "mmPr", "mmquery", "mmr", "mnary", "mnaryPr",
    "mnoBreak", "mnum", "mobjDist", "moMath", "moMathPara", "moMathParaPr", "mopEmu",
    "mphant", "mphantPr", "mplcHide", "mpos", "mr", "mrad", "mradPr", "mrPr", "msepChr",
    "mshow", "mshp", "msPre", "msPrePr", "msSub", "msSubPr", "msSubSup", "msSubSupPr", "msSup",
    "msSupPr", "mstrikeBLTR", "mstrikeH", "mstrikeTLBR", "mstrikeV", "msub", "msubHide",
    "msup", "msupHide", "mtransp", "mtype", "mvertJc", "mvfmf", "mvfml", "mvtof", "mvtol",
    "mzeroAsc", "mzeroDesc", "mzeroWid", "nesttableprops", "nextfile", "nonesttables",
    "objalias", "objclass", "objdata", "object", "objname", "objsect", "objtime", "oldcprops",
    "oldpprops", "oldsprops", "oldtprops", "oleclsid", "operator", "panose", "password",
    "passwordhash", "pgp", "pgptbl", "picprop", "pict", "pn", "pnseclvl", "pntext", "pntxta",
    "pntxtb", "printim", "private", "propname", "protend", "protstart", "protusertbl", "pxe",
    "result", "revtbl", "revtim", "rsidtbl", "rxe", "shp", "shpgrp", "shpinst",
    "shppict", "shprslt", "shptxt", "sn", "sp", "staticval", "stylesheet", "subject", "sv",
    "svb", "tc", "template", "themedata", "title", "txe", "ud", "upr", "userprops",
    "wgrffmtfilter", "windowcaption", "writereservation", "writereservhash", "xe", "xform",
    "xmlattrname", "xmlattrvalue", "xmlclose", "xmlname", "xmlnstbl", "xmlopen",
};

/// Control words replaced by fixed text. Line endings are emitted as written
/// here; no normalization happens afterwards.
pub static SPECIAL_CHARACTERS: phf::Map<&'static str, &'static str> = phf_map! {
    "par" => "\r\n",
    "sect" => "\n\n",
    "page" => "\n\n",
    "line" => "\r\n",
    "tab" => "\t",
    "emdash" => "\u{2014}",
    "endash" => "\u{2013}",
    "emspace" => "\u{2003}",
    "enspace" => "\u{2002}",
    "qmspace" => "\u{2005}",
    "bullet" => "\u{2022}",
    "lquote" => "\u{2018}",
    "rquote" => "\u{2019}",
    "ldblquote" => "\u{201C}",
    "rdblquote" => "\u{201D}",
};

/// Whether `word` opens an ignorable destination.
#[inline]
pub fn is_destination(word: &str) -> bool {
    DESTINATIONS.contains(word)
}

/// Fixed replacement text for `word`, if it is a special character.
#[inline]
pub fn special_character(word: &str) -> Option<&'static str> {
    SPECIAL_CHARACTERS.get(word).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destinations() {
        assert!(is_destination("fonttbl"));
        assert!(is_destination("colortbl"));
        assert!(is_destination("pict"));
        assert!(is_destination("moMathPara"));
        assert!(!is_destination("par"));
        assert!(!is_destination("FONTTBL"));
        assert!(!is_destination("rtf"));
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(special_character("par"), Some("\r\n"));
        assert_eq!(special_character("sect"), Some("\n\n"));
        assert_eq!(special_character("tab"), Some("\t"));
        assert_eq!(special_character("emdash"), Some("—"));
        assert_eq!(special_character("rdblquote"), Some("”"));
        assert_eq!(special_character("b"), None);
    }

    #[test]
    fn test_tables_do_not_overlap() {
        for word in SPECIAL_CHARACTERS.keys() {
            assert!(!is_destination(word), "{word} is in both tables");
        }
    }
}
