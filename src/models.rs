//! Public data models decoded from MailHog responses.
//!
//! MailHog emits capitalised field names (`ID`, `From`, `MIME`, ...) while
//! older tooling produced lowercase ones; both spellings are accepted. `null`
//! and missing fields decode to empty values.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// SMTP forward or return path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// Relay hops, in order.
    #[serde(alias = "Relays", default, deserialize_with = "null_as_default")]
    pub relays: Vec<String>,
    /// Local part of the address.
    #[serde(alias = "Mailbox", default, deserialize_with = "null_as_default")]
    pub mailbox: String,
    /// Domain of the address.
    #[serde(alias = "Domain", default, deserialize_with = "null_as_default")]
    pub domain: String,
    /// Raw SMTP parameter string.
    #[serde(alias = "Params", default, deserialize_with = "null_as_default")]
    pub params: String,
}

impl Path {
    /// Render the path as `mailbox@domain`.
    pub fn address(&self) -> String {
        format!("{}@{}", self.mailbox, self.domain)
    }
}

/// Known message headers. Each header may repeat, so every entry is a list.
///
/// Header names are matched case-insensitively on input; unknown headers
/// are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Headers {
    pub content_id: Vec<String>,
    pub content_disposition: Vec<String>,
    pub content_transfer_encoding: Vec<String>,
    pub content_type: Vec<String>,
    pub date: Vec<String>,
    pub from: Vec<String>,
    pub mime_version: Vec<String>,
    pub message_id: Vec<String>,
    pub received: Vec<String>,
    pub return_path: Vec<String>,
    pub subject: Vec<String>,
    pub to: Vec<String>,
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: BTreeMap<String, Value> = null_as_default(deserializer)?;
        let mut headers = Headers::default();

        for (name, values) in raw {
            let slot = match name.to_ascii_lowercase().as_str() {
                "content-id" => &mut headers.content_id,
                "content-disposition" => &mut headers.content_disposition,
                "content-transfer-encoding" => &mut headers.content_transfer_encoding,
                "content-type" => &mut headers.content_type,
                "date" => &mut headers.date,
                "from" => &mut headers.from,
                "mime-version" => &mut headers.mime_version,
                "message-id" => &mut headers.message_id,
                "received" => &mut headers.received,
                "return-path" => &mut headers.return_path,
                "subject" => &mut headers.subject,
                "to" => &mut headers.to,
                _ => continue,
            };
            let values: Option<Vec<String>> =
                serde_json::from_value(values).map_err(D::Error::custom)?;
            slot.extend(values.unwrap_or_default());
        }

        Ok(headers)
    }
}

/// One MIME content part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(alias = "Headers", default)]
    pub headers: Headers,
    #[serde(alias = "Body", default, deserialize_with = "null_as_default")]
    pub body: String,
    /// Size of the part in bytes.
    #[serde(alias = "Size", default, deserialize_with = "null_as_default")]
    pub size: u64,
    /// Nested parts for multipart bodies.
    #[serde(alias = "MIME", default, deserialize_with = "null_as_default")]
    pub mime: Mime,
}

/// MIME parts of a multipart body. Empty when the message is not multipart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mime {
    #[serde(rename = "Parts", alias = "parts", default, deserialize_with = "null_as_default")]
    pub parts: Vec<Content>,
}

/// Data from the original SMTP transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raw {
    /// Envelope sender.
    #[serde(alias = "From", default, deserialize_with = "null_as_default")]
    pub from: String,
    /// Envelope recipients, in order.
    #[serde(alias = "To", default, deserialize_with = "null_as_default")]
    pub to: Vec<String>,
    #[serde(alias = "Date", default, deserialize_with = "null_as_default")]
    pub date: String,
    /// HELO/EHLO name given by the sending client.
    #[serde(alias = "Helo", default, deserialize_with = "null_as_default")]
    pub helo: String,
}

/// A single captured email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Server-assigned identifier, e.g. `eZVH3mSvQl9oWzIc4U1j1zWO8TWFWNv123iPrS0sOkE=@mailhog.example`.
    #[serde(alias = "ID", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(alias = "From", default, deserialize_with = "null_as_default")]
    pub from: Path,
    #[serde(alias = "To", default, deserialize_with = "null_as_default")]
    pub to: Vec<Path>,
    #[serde(alias = "Content", default, deserialize_with = "null_as_default")]
    pub content: Content,
    /// When MailHog received the message.
    #[serde(alias = "Created", default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(alias = "MIME", default, deserialize_with = "null_as_default")]
    pub mime: Mime,
    #[serde(alias = "Raw", default, deserialize_with = "null_as_default")]
    pub raw: Raw,
}

impl Message {
    /// First `Subject` header of the message, if present.
    pub fn subject(&self) -> Option<&str> {
        self.content.headers.subject.first().map(String::as_str)
    }
}

/// A page of messages, as returned by the list and search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    /// Number of messages available on the server.
    #[serde(alias = "Total", default, deserialize_with = "null_as_default")]
    pub total: usize,
    /// Number of messages in this page.
    #[serde(alias = "Count", default, deserialize_with = "null_as_default")]
    pub count: usize,
    /// Offset of the first message in this page.
    #[serde(alias = "Start", default, deserialize_with = "null_as_default")]
    pub start: usize,
    #[serde(alias = "Items", default, deserialize_with = "null_as_default")]
    pub items: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_mailhog_message() {
        let value = json!({
            "ID": "eZVH3mSvQl9oWzIc4U1j1zWO8TWFWNv123iPrS0sOkE=@mailhog.example",
            "From": {"Relays": null, "Mailbox": "sender", "Domain": "example.com", "Params": ""},
            "To": [{"Relays": null, "Mailbox": "rcpt", "Domain": "example.org", "Params": ""}],
            "Content": {
                "Headers": {
                    "Content-Type": ["text/plain; charset=utf-8"],
                    "Subject": ["Welcome"],
                    "Received": ["from localhost", "from relay"],
                    "X-Mailer": ["something"]
                },
                "Body": "hello there",
                "Size": 312,
                "MIME": null
            },
            "Created": "2024-03-01T10:15:30.123456789+01:00",
            "MIME": null,
            "Raw": {
                "From": "sender@example.com",
                "To": ["rcpt@example.org"],
                "Data": "Subject: Welcome\r\n\r\nhello there",
                "Helo": "localhost"
            }
        });

        let message: Message = serde_json::from_value(value).unwrap();
        assert_eq!(
            message.id,
            "eZVH3mSvQl9oWzIc4U1j1zWO8TWFWNv123iPrS0sOkE=@mailhog.example"
        );
        assert_eq!(message.from.address(), "sender@example.com");
        assert!(message.from.relays.is_empty());
        assert_eq!(message.to.len(), 1);
        assert_eq!(message.to[0].address(), "rcpt@example.org");
        assert_eq!(message.subject(), Some("Welcome"));
        assert_eq!(message.content.headers.content_type, ["text/plain; charset=utf-8"]);
        assert_eq!(message.content.headers.received.len(), 2);
        assert_eq!(message.content.body, "hello there");
        assert_eq!(message.content.size, 312);
        assert!(message.mime.parts.is_empty());
        assert_eq!(message.raw.helo, "localhost");
        assert_eq!(message.raw.to, ["rcpt@example.org"]);

        let created = message.created.unwrap();
        assert_eq!(created.to_rfc3339(), "2024-03-01T09:15:30.123456789+00:00");
    }

    #[test]
    fn decodes_lowercase_fields() {
        let value = json!({
            "total": 1,
            "count": 1,
            "start": 0,
            "items": [{
                "id": "abc@mailhog.example",
                "from": {"relays": ["mx1"], "mailbox": "a", "domain": "b.c", "params": "SIZE=10"},
                "content": {"headers": {"subject": ["hi"]}, "body": "", "size": 0}
            }]
        });

        let messages: Messages = serde_json::from_value(value).unwrap();
        assert_eq!(messages.total, 1);
        assert_eq!(messages.count, 1);
        assert_eq!(messages.items.len(), 1);

        let message = &messages.items[0];
        assert_eq!(message.id, "abc@mailhog.example");
        assert_eq!(message.from.relays, ["mx1"]);
        assert_eq!(message.from.params, "SIZE=10");
        assert_eq!(message.subject(), Some("hi"));
        assert!(message.created.is_none());
    }

    #[test]
    fn decodes_multipart_mime() {
        let value = json!({
            "ID": "multi@mailhog.example",
            "MIME": {
                "Parts": [
                    {"Headers": {"Content-Type": ["text/plain"]}, "Body": "plain", "Size": 5, "MIME": null},
                    {"Headers": {"Content-Type": ["text/html"]}, "Body": "<p>html</p>", "Size": 11, "MIME": null}
                ]
            }
        });

        let message: Message = serde_json::from_value(value).unwrap();
        assert_eq!(message.mime.parts.len(), 2);
        assert_eq!(message.mime.parts[1].headers.content_type, ["text/html"]);
        assert_eq!(message.mime.parts[1].body, "<p>html</p>");
    }

    #[test]
    fn header_names_are_case_insensitive() {
        let headers: Headers = serde_json::from_value(json!({
            "MESSAGE-ID": ["<1@x>"],
            "mime-version": ["1.0"],
            "Return-Path": ["<bounce@x>"],
            "Content-Transfer-Encoding": null
        }))
        .unwrap();

        assert_eq!(headers.message_id, ["<1@x>"]);
        assert_eq!(headers.mime_version, ["1.0"]);
        assert_eq!(headers.return_path, ["<bounce@x>"]);
        assert!(headers.content_transfer_encoding.is_empty());
    }

    #[test]
    fn headers_serialize_with_kebab_case_keys() {
        let headers = Headers {
            content_type: vec!["text/plain".into()],
            ..Headers::default()
        };
        let value = serde_json::to_value(&headers).unwrap();
        assert_eq!(value["content-type"], json!(["text/plain"]));
        assert_eq!(value["message-id"], json!([]));
    }

    #[test]
    fn decodes_capitalised_page() {
        let messages: Messages = serde_json::from_value(json!({
            "Total": 3,
            "Count": 1,
            "Start": 2,
            "Items": [{"ID": "x@mailhog.example"}]
        }))
        .unwrap();

        assert_eq!(messages.total, 3);
        assert_eq!(messages.count, 1);
        assert_eq!(messages.start, 2);
        assert_eq!(messages.items.len(), 1);
        assert_eq!(messages.items[0].id, "x@mailhog.example");
    }

    #[test]
    fn null_page_counters_decode_as_zero() {
        let messages: Messages = serde_json::from_value(json!({
            "total": null,
            "count": null,
            "start": null,
            "items": null
        }))
        .unwrap();

        assert_eq!(messages, Messages::default());
    }

    #[test]
    fn unknown_headers_of_any_type_are_skipped() {
        let headers: Headers = serde_json::from_value(json!({
            "Subject": ["a"],
            "X-Priority": "1",
            "X-Spam-Score": 4.2,
            "X-Meta": {"nested": true}
        }))
        .unwrap();

        assert_eq!(headers.subject, ["a"]);
    }

    #[test]
    fn known_header_with_wrong_type_is_rejected() {
        let result = serde_json::from_value::<Headers>(json!({"Subject": "not a list"}));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_wrong_shape() {
        let result = serde_json::from_value::<Messages>(json!({"total": "many"}));
        assert!(result.is_err());
    }
}
