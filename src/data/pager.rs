use super::model::TripTable;

/// Rows shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Cyclic window over the raw cells of a table.
///
/// Each call to [`Pager::next_page`] returns up to `page_size` rows starting
/// at the cursor, then advances it. Once the cursor reaches or passes the end
/// it wraps to the first row, so the view never runs out; the caller decides
/// when to stop.
#[derive(Debug)]
pub struct Pager<'a> {
    table: &'a TripTable,
    offset: usize,
    page_size: usize,
}

impl<'a> Pager<'a> {
    /// A `page_size` of zero falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(table: &'a TripTable, page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Pager {
            table,
            offset: 0,
            page_size,
        }
    }

    /// Column headers of the rows returned by [`Pager::next_page`].
    pub fn columns(&self) -> &'a [String] {
        &self.table.schema.columns
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Position of the next page's first row.
    #[cfg(test)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// True whenever there is at least one row to show.
    pub fn has_more(&self) -> bool {
        !self.table.is_empty()
    }

    pub fn next_page(&mut self) -> Vec<&'a [String]> {
        let table = self.table;
        let total = table.len();
        if total == 0 {
            return Vec::new();
        }

        let end = (self.offset + self.page_size).min(total);
        let page = table.trips[self.offset..end]
            .iter()
            .map(|trip| trip.raw.as_slice())
            .collect();

        self.offset += self.page_size;
        if self.offset >= total {
            self.offset = 0;
        }
        page
    }
}
