use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::feed::FeedItem;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
  <title>Astro Blog</title>
  <link>https://example.com</link>
  <description>Writing about Astro, web dev, and things I learn</description>
  <item>
    <title>Deploying Astro on a VPS</title>
    <link>https://example.com/blog/deploying-astro/</link>
    <guid isPermaLink="true">https://example.com/blog/deploying-astro/</guid>
    <description>From a laptop to a small VPS</description>
    <pubDate>Fri, 1 Mar 2024 04:30:00 +0000</pubDate>
    <category>deploy</category>
    <author>Amruth</author>
    <tags><tag>astro</tag><tag>vps</tag></tags>
  </item>
</channel>
</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, items: &[FeedItem]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;
        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;

        for item in items {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", &item.title)?;

            let link = full_link(self.ch_link, &item.link);
            push_text(&mut writer, "link", &link)?;

            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(&link)))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            push_text(&mut writer, "description", &item.description)?;
            push_text(&mut writer, "pubDate", &item.pub_date.to_rfc2822())?;

            for category in item.categories.iter() {
                push_text(&mut writer, "category", category)?;
            }

            if let Some(ref author) = item.author {
                push_text(&mut writer, "author", author)?;
            }

            // <tags><tag>astro</tag><tag>vps</tag></tags>
            if let Some(ref tags) = item.custom_data {
                writer.write_event(Event::Start(BytesStart::new("tags")))?;
                for tag in tags.0.iter() {
                    push_text(&mut writer, "tag", tag)?;
                }
                writer.write_event(Event::End(BytesEnd::new("tags")))?;
            }

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

/// Resolves a site relative link against the site url, keeping any path the site url has.
fn full_link(base_url: &str, link: &str) -> String {
    let base_url = base_url.trim_end_matches('/');

    if link.starts_with('/') {
        format!("{}{}", base_url, link)
    } else {
        format!("{}/{}", base_url, link)
    }
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
