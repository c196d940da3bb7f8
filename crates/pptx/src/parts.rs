//! Fixed and per-deck package parts other than the slides themselves.

use crate::theme::{SLIDE_HEIGHT, SLIDE_WIDTH};
use quick_xml::escape::escape;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

pub(crate) const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
pub(crate) const ROOT_RELS_PATH: &str = "_rels/.rels";
pub(crate) const APP_PATH: &str = "docProps/app.xml";
pub(crate) const CORE_PATH: &str = "docProps/core.xml";
pub(crate) const PRESENTATION_PATH: &str = "ppt/presentation.xml";
pub(crate) const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";
pub(crate) const MASTER_PATH: &str = "ppt/slideMasters/slideMaster1.xml";
pub(crate) const MASTER_RELS_PATH: &str = "ppt/slideMasters/_rels/slideMaster1.xml.rels";
pub(crate) const LAYOUT_PATH: &str = "ppt/slideLayouts/slideLayout1.xml";
pub(crate) const LAYOUT_RELS_PATH: &str = "ppt/slideLayouts/_rels/slideLayout1.xml.rels";
pub(crate) const THEME_PATH: &str = "ppt/theme/theme1.xml";
pub(crate) const PRES_PROPS_PATH: &str = "ppt/presProps.xml";
pub(crate) const VIEW_PROPS_PATH: &str = "ppt/viewProps.xml";
pub(crate) const TABLE_STYLES_PATH: &str = "ppt/tableStyles.xml";

pub(crate) fn slide_path(number: usize) -> String {
    format!("ppt/slides/slide{}.xml", number)
}

pub(crate) fn slide_rels_path(number: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", number)
}

pub(crate) fn content_types(slide_count: usize) -> String {
    let mut xml = format!(
        concat!(
            "{}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
            "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
            "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
            "<Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>",
            "<Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>",
            "<Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>",
            "<Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>",
            "<Override PartName=\"/ppt/presProps.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presProps+xml\"/>",
            "<Override PartName=\"/ppt/viewProps.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml\"/>",
            "<Override PartName=\"/ppt/tableStyles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml\"/>",
            "<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>",
            "<Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>",
        ),
        XML_DECL
    );
    for n in 1..=slide_count {
        xml.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>",
            n
        ));
    }
    xml.push_str("</Types>");
    xml
}

pub(crate) fn root_rels() -> String {
    format!(
        concat!(
            "{}<Relationships xmlns=\"{}\">",
            "<Relationship Id=\"rId1\" Type=\"{}/officeDocument\" Target=\"ppt/presentation.xml\"/>",
            "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>",
            "<Relationship Id=\"rId3\" Type=\"{}/extended-properties\" Target=\"docProps/app.xml\"/>",
            "</Relationships>"
        ),
        XML_DECL, NS_RELS, NS_R, NS_R
    )
}

pub(crate) fn app_properties(slide_count: usize) -> String {
    format!(
        concat!(
            "{}<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" ",
            "xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">",
            "<Application>tutor</Application><Slides>{}</Slides></Properties>"
        ),
        XML_DECL, slide_count
    )
}

pub(crate) fn core_properties(title: &str) -> String {
    format!(
        concat!(
            "{}<cp:coreProperties xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" ",
            "xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:dcterms=\"http://purl.org/dc/terms/\" ",
            "xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
            "<dc:title>{}</dc:title><dc:creator>tutor</dc:creator></cp:coreProperties>"
        ),
        XML_DECL,
        escape(title)
    )
}

/// Slide rIds start at 2; rId1 is the master.
pub(crate) fn presentation(slide_count: usize) -> String {
    let slide_ids: String = (1..=slide_count)
        .map(|n| format!("<p:sldId id=\"{}\" r:id=\"rId{}\"/>", 255 + n, n + 1))
        .collect();
    format!(
        concat!(
            "{}<p:presentation xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\" saveSubsetFonts=\"1\">",
            "<p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>",
            "<p:sldIdLst>{}</p:sldIdLst>",
            "<p:sldSz cx=\"{}\" cy=\"{}\" type=\"screen4x3\"/>",
            "<p:notesSz cx=\"{}\" cy=\"{}\"/>",
            "</p:presentation>"
        ),
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        slide_ids,
        SLIDE_WIDTH,
        SLIDE_HEIGHT,
        SLIDE_HEIGHT,
        SLIDE_WIDTH
    )
}

pub(crate) fn presentation_rels(slide_count: usize) -> String {
    let mut xml = format!(
        "{}<Relationships xmlns=\"{}\"><Relationship Id=\"rId1\" Type=\"{}/slideMaster\" Target=\"slideMasters/slideMaster1.xml\"/>",
        XML_DECL, NS_RELS, NS_R
    );
    for n in 1..=slide_count {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"{}/slide\" Target=\"slides/slide{}.xml\"/>",
            n + 1,
            NS_R,
            n
        ));
    }
    let tail = [
        ("theme", "theme/theme1.xml"),
        ("presProps", "presProps.xml"),
        ("viewProps", "viewProps.xml"),
        ("tableStyles", "tableStyles.xml"),
    ];
    for (offset, (kind, target)) in tail.iter().enumerate() {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"{}/{}\" Target=\"{}\"/>",
            slide_count + 2 + offset,
            NS_R,
            kind,
            target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

pub(crate) fn slide_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"{}\"><Relationship Id=\"rId1\" Type=\"{}/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/></Relationships>",
        XML_DECL, NS_RELS, NS_R
    )
}

pub(crate) fn master_rels() -> String {
    format!(
        concat!(
            "{}<Relationships xmlns=\"{}\">",
            "<Relationship Id=\"rId1\" Type=\"{}/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>",
            "<Relationship Id=\"rId2\" Type=\"{}/theme\" Target=\"../theme/theme1.xml\"/>",
            "</Relationships>"
        ),
        XML_DECL, NS_RELS, NS_R, NS_R
    )
}

pub(crate) fn layout_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"{}\"><Relationship Id=\"rId1\" Type=\"{}/slideMaster\" Target=\"../slideMasters/slideMaster1.xml\"/></Relationships>",
        XML_DECL, NS_RELS, NS_R
    )
}

const EMPTY_GROUP: &str = concat!(
    "<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>",
    "<p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>",
    "<a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>"
);

pub(crate) fn slide_master() -> String {
    format!(
        concat!(
            "{}<p:sldMaster xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">",
            "<p:cSld><p:bg><p:bgRef idx=\"1001\"><a:schemeClr val=\"bg1\"/></p:bgRef></p:bg>",
            "<p:spTree>{}</p:spTree></p:cSld>",
            "<p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" ",
            "accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>",
            "<p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>",
            "<p:txStyles>",
            "<p:titleStyle><a:lvl1pPr algn=\"ctr\"><a:defRPr sz=\"3200\"/></a:lvl1pPr></p:titleStyle>",
            "<p:bodyStyle><a:lvl1pPr><a:defRPr sz=\"2000\"/></a:lvl1pPr></p:bodyStyle>",
            "<p:otherStyle><a:lvl1pPr><a:defRPr sz=\"1800\"/></a:lvl1pPr></p:otherStyle>",
            "</p:txStyles></p:sldMaster>"
        ),
        XML_DECL, NS_A, NS_R, NS_P, EMPTY_GROUP
    )
}

pub(crate) fn slide_layout() -> String {
    format!(
        concat!(
            "{}<p:sldLayout xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\" type=\"blank\" preserve=\"1\">",
            "<p:cSld name=\"Blank\"><p:spTree>{}</p:spTree></p:cSld>",
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"
        ),
        XML_DECL, NS_A, NS_R, NS_P, EMPTY_GROUP
    )
}

pub(crate) fn pres_props() -> String {
    format!(
        "{}<p:presentationPr xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\"/>",
        XML_DECL, NS_A, NS_R, NS_P
    )
}

pub(crate) fn view_props() -> String {
    format!(
        "{}<p:viewPr xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\"><p:gridSpacing cx=\"76200\" cy=\"76200\"/></p:viewPr>",
        XML_DECL, NS_A, NS_R, NS_P
    )
}

pub(crate) fn table_styles() -> String {
    format!(
        "{}<a:tblStyleLst xmlns:a=\"{}\" def=\"{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}\"/>",
        XML_DECL, NS_A
    )
}

const PH_FILL: &str = "<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>";

pub(crate) fn theme() -> String {
    let fills = PH_FILL.repeat(3);
    let lines: String = [9525, 25400, 38100]
        .iter()
        .map(|w| format!("<a:ln w=\"{}\">{}</a:ln>", w, PH_FILL))
        .collect();
    let effects = "<a:effectStyle><a:effectLst/></a:effectStyle>".repeat(3);
    format!(
        concat!(
            "{}<a:theme xmlns:a=\"{}\" name=\"Office Theme\"><a:themeElements>",
            "<a:clrScheme name=\"Office\">",
            "<a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>",
            "<a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>",
            "<a:dk2><a:srgbClr val=\"1F497D\"/></a:dk2>",
            "<a:lt2><a:srgbClr val=\"EEECE1\"/></a:lt2>",
            "<a:accent1><a:srgbClr val=\"4F81BD\"/></a:accent1>",
            "<a:accent2><a:srgbClr val=\"C0504D\"/></a:accent2>",
            "<a:accent3><a:srgbClr val=\"9BBB59\"/></a:accent3>",
            "<a:accent4><a:srgbClr val=\"8064A2\"/></a:accent4>",
            "<a:accent5><a:srgbClr val=\"4BACC6\"/></a:accent5>",
            "<a:accent6><a:srgbClr val=\"F79646\"/></a:accent6>",
            "<a:hlink><a:srgbClr val=\"0000FF\"/></a:hlink>",
            "<a:folHlink><a:srgbClr val=\"800080\"/></a:folHlink>",
            "</a:clrScheme>",
            "<a:fontScheme name=\"Office\">",
            "<a:majorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>",
            "<a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>",
            "</a:fontScheme>",
            "<a:fmtScheme name=\"Office\">",
            "<a:fillStyleLst>{}</a:fillStyleLst>",
            "<a:lnStyleLst>{}</a:lnStyleLst>",
            "<a:effectStyleLst>{}</a:effectStyleLst>",
            "<a:bgFillStyleLst>{}</a:bgFillStyleLst>",
            "</a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"
        ),
        XML_DECL, NS_A, fills, lines, effects, fills
    )
}
