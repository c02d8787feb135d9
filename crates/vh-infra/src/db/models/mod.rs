pub mod comm_history;
pub mod kakunin;
pub mod syukka_container;
pub mod syukka_meisai;
pub mod syukka_meisai_work;
pub mod system_setting;
pub mod yotei;

pub use comm_history::CommHistoryRow;
pub use kakunin::{KakuninContainerRow, KakuninMeisaiRow, KakuninMeisaiWorkRow};
pub use syukka_container::{NewSyukkaContainerRow, SyukkaContainerRow};
pub use syukka_meisai::{NewSyukkaMeisaiRow, SyukkaMeisaiRow};
pub use syukka_meisai_work::{NewSyukkaMeisaiWorkRow, SyukkaMeisaiWorkRow};
pub use system_setting::SystemSettingRow;
pub use yotei::YoteiRow;
