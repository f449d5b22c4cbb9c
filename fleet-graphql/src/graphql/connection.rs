use async_graphql::{
    connection::{Connection, CursorType, Edge},
    OutputType, SimpleObject,
};

use crate::{
    error::Error,
    pagination::{Cursor, Page},
};

/// Additional fields of every fleet connection
#[derive(SimpleObject)]
pub struct ConnectionFields {
    /// Total number of items in this connection, regardless of the page
    pub total_count: u64,
}

/// A fleet connection of `T` nodes
pub type FleetConnection<T> = Connection<Cursor, T, ConnectionFields>;

impl CursorType for Cursor {
    type Error = Box<Error>;

    fn decode_cursor(s: &str) -> Result<Self, Self::Error> {
        Cursor::decode(s)
    }

    fn encode_cursor(&self) -> String {
        self.encode()
    }
}

/// Trait to convert into a [Connection]
pub trait IntoConnection<T>
where
    T: OutputType,
{
    /// Converts `self` to a [Connection]
    fn into_connection(self) -> FleetConnection<T>;
}

impl<T> IntoConnection<T> for Page<T>
where
    T: OutputType,
{
    fn into_connection(self) -> FleetConnection<T> {
        let mut conn = Connection::with_additional_fields(
            self.page_info.has_previous_page,
            self.page_info.has_next_page,
            ConnectionFields {
                total_count: self.total_count,
            },
        );
        conn.edges
            .extend(self.edges.into_iter().map(|e| Edge::new(e.cursor, e.node)));
        conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor() {
        let cursor = Cursor::new(3);

        let encoded = cursor.encode_cursor();
        assert_eq!(&encoded, "Mw");

        let decoded = Cursor::decode_cursor(&encoded);
        assert!(decoded.is_ok(), "Could not decode the cursor");
        assert_eq!(decoded.unwrap().offset(), 3);

        assert!(Cursor::decode_cursor("not a cursor").is_err());
    }

    #[test]
    fn test_into_connection() {
        let page = Page::paginate(10, vec![3u32, 4, 5], 3, Some(3));

        let conn = page.into_connection();

        assert!(conn.has_previous_page);
        assert!(conn.has_next_page);
        assert_eq!(conn.additional_fields.total_count, 10);
        assert_eq!(
            conn.edges.iter().map(|e| e.cursor.encode_cursor()).collect::<Vec<_>>(),
            vec!["Mw", "NA", "NQ"]
        );
        assert_eq!(conn.edges.iter().map(|e| e.node).collect::<Vec<_>>(), vec![3, 4, 5]);
    }
}
