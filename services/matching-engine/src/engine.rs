//! Matching engine core
//!
//! Owns the order book and a monotonic id counter. Every submission is
//! assigned the next id, returned even when the order is fully consumed on
//! arrival. Liquidity is taken best-price first, FIFO within a level, and
//! every fill executes at the maker's posted price.

use types::errors::EngineError;
use types::ids::OrderId;
use types::numeric::{Price, Qty, TimePoint};
use types::order::{Order, Side};
use types::trade::Fill;

use crate::book::order_book::reindex_level;
use crate::book::OrderBook;
use crate::matching::crossing;

/// Price–time-priority matching engine for one order book
pub struct MatchingEngine {
    book: OrderBook,
    next_id: OrderId,
}

impl MatchingEngine {
    /// Create a new engine over an empty book; ids start at 1
    pub fn new() -> Self {
        Self {
            book: OrderBook::new(),
            next_id: 1,
        }
    }

    /// Read-only access to the book
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Mutable access to the book (cancellation goes directly to the book)
    pub fn book_mut(&mut self) -> &mut OrderBook {
        &mut self.book
    }

    fn alloc_id(&mut self) -> OrderId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Submit a market order
    ///
    /// Consumes liquidity from the opposite side until `qty` is exhausted or
    /// that side is empty; any residual is discarded. Fills are appended to
    /// `fills` in execution order.
    pub fn submit_market(
        &mut self,
        side: Side,
        qty: Qty,
        ts: TimePoint,
        fills: &mut Vec<Fill>,
    ) -> Result<OrderId, EngineError> {
        if qty <= 0 {
            return Err(EngineError::InvalidQuantity);
        }
        let id = self.alloc_id();
        let mut remaining = qty;
        match side {
            Side::BUY => self.match_buy(id, &mut remaining, ts, fills, None),
            Side::SELL => self.match_sell(id, &mut remaining, ts, fills, None),
        }
        Ok(id)
    }

    /// Submit a limit order
    ///
    /// Matches against the opposite side gated by the limit price; any
    /// remaining quantity is posted to the book under the assigned id.
    pub fn submit_limit(
        &mut self,
        side: Side,
        px: Price,
        qty: Qty,
        ts: TimePoint,
        fills: &mut Vec<Fill>,
    ) -> Result<OrderId, EngineError> {
        if qty <= 0 {
            return Err(EngineError::InvalidQuantity);
        }
        if px <= 0 {
            return Err(EngineError::InvalidPrice);
        }
        let id = self.alloc_id();
        let mut remaining = qty;
        match side {
            Side::BUY => self.match_buy(id, &mut remaining, ts, fills, Some(px)),
            Side::SELL => self.match_sell(id, &mut remaining, ts, fills, Some(px)),
        }
        if remaining > 0 {
            self.book.add_limit(&Order::limit(id, side, px, remaining, ts))?;
        }
        Ok(id)
    }

    /// Match an incoming buy against asks, best (lowest) level first
    fn match_buy(
        &mut self,
        taker_id: OrderId,
        remaining: &mut Qty,
        ts: TimePoint,
        fills: &mut Vec<Fill>,
        limit_px: Option<Price>,
    ) {
        while *remaining > 0 {
            let Some(ask_px) = self.book.asks.best_price() else {
                break;
            };
            if !crossing::taker_can_take(Side::BUY, limit_px, ask_px) {
                break;
            }

            let emptied = match self.book.asks.level_mut(ask_px) {
                Some(level) => {
                    while *remaining > 0 {
                        let Some(maker) = level.front_mut() else {
                            break;
                        };
                        let traded = Qty::min(*remaining, maker.qty);
                        fills.push(Fill {
                            taker_id,
                            maker_id: maker.id,
                            taker_side: Side::BUY,
                            price: ask_px,
                            qty: traded,
                            ts,
                        });
                        maker.qty -= traded;
                        *remaining -= traded;
                        if maker.qty == 0 {
                            let maker_id = maker.id;
                            self.book.index.remove(&maker_id);
                            level.pop_front();
                            // Survivors shifted forward by one
                            reindex_level(&mut self.book.index, level);
                        }
                    }
                    level.is_empty()
                }
                None => false,
            };

            if emptied {
                self.book.asks.remove_level(ask_px);
            }
        }
    }

    /// Match an incoming sell against bids, best (highest) level first
    fn match_sell(
        &mut self,
        taker_id: OrderId,
        remaining: &mut Qty,
        ts: TimePoint,
        fills: &mut Vec<Fill>,
        limit_px: Option<Price>,
    ) {
        while *remaining > 0 {
            let Some(bid_px) = self.book.bids.best_price() else {
                break;
            };
            if !crossing::taker_can_take(Side::SELL, limit_px, bid_px) {
                break;
            }

            let emptied = match self.book.bids.level_mut(bid_px) {
                Some(level) => {
                    while *remaining > 0 {
                        let Some(maker) = level.front_mut() else {
                            break;
                        };
                        let traded = Qty::min(*remaining, maker.qty);
                        fills.push(Fill {
                            taker_id,
                            maker_id: maker.id,
                            taker_side: Side::SELL,
                            price: bid_px,
                            qty: traded,
                            ts,
                        });
                        maker.qty -= traded;
                        *remaining -= traded;
                        if maker.qty == 0 {
                            let maker_id = maker.id;
                            self.book.index.remove(&maker_id);
                            level.pop_front();
                            reindex_level(&mut self.book.index, level);
                        }
                    }
                    level.is_empty()
                }
                None => false,
            };

            if emptied {
                self.book.bids.remove_level(bid_px);
            }
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}
