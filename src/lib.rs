pub mod configuration;

pub mod cache {
    pub mod holidaystore;
    pub mod storagebackend;
}

pub mod holiday {
    pub mod holidayerror;
    pub mod holidayinterval;
}

pub mod notice {
    pub mod noticeparser;
    pub mod noticelocator;
    pub mod noticefetcher;
    pub mod noticesource;
}

pub mod time {
    pub mod utility;

    pub mod calendar {
        pub mod holidaycalendar;
        pub mod chinaholidaycalendar;
        pub mod holidaydelta;
    }
}
